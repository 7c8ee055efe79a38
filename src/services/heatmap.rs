//! Annotated heatmap rendering of a correlation matrix.
//!
//! Output is a PNG: a diverging blue → white → red cell grid over
//! [-1, 1] with the coefficient printed in each cell, variable names
//! along the left edge and rotated along the bottom. Cells with no
//! defined coefficient stay neutral gray and unannotated.

use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

use crate::services::correlation::CorrelationMatrix;

const WIDTH: u32 = 1400;
const HEIGHT: u32 = 900;
const MARGIN_LEFT: i32 = 300;
const MARGIN_TOP: i32 = 80;
const MARGIN_RIGHT: i32 = 60;
const MARGIN_BOTTOM: i32 = 220;

/// Negative endpoint of the diverging fill.
const COLD: (u8, u8, u8) = (59, 76, 192);
/// Positive endpoint of the diverging fill.
const WARM: (u8, u8, u8) = (180, 4, 38);

/// Renders the matrix to a PNG file.
pub fn render_heatmap(matrix: &CorrelationMatrix, title: &str, output: &Path) -> Result<()> {
    if matrix.is_empty() {
        anyhow::bail!("nothing to render: the correlation matrix has no variables");
    }
    let n = matrix.len() as i32;

    let root = BitMapBackend::new(output, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let title_style =
        TextStyle::from(("sans-serif", 30).into_font()).pos(Pos::new(HPos::Center, VPos::Top));
    root.draw_text(title, &title_style, (WIDTH as i32 / 2, 24))?;

    let cell_w = (WIDTH as i32 - MARGIN_LEFT - MARGIN_RIGHT) / n;
    let cell_h = (HEIGHT as i32 - MARGIN_TOP - MARGIN_BOTTOM) / n;

    let value_style =
        TextStyle::from(("sans-serif", 15).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
    for i in 0..n {
        for j in 0..n {
            let x0 = MARGIN_LEFT + j * cell_w;
            let y0 = MARGIN_TOP + i * cell_h;
            let corner = [(x0, y0), (x0 + cell_w, y0 + cell_h)];
            match matrix.get(i as usize, j as usize) {
                Some(coefficient) => {
                    let fill = diverging_color(coefficient);
                    root.draw(&Rectangle::new(corner, fill.filled()))?;
                    let ink = if coefficient.abs() > 0.6 { &WHITE } else { &BLACK };
                    root.draw_text(
                        &format!("{coefficient:.2}"),
                        &value_style.color(ink),
                        (x0 + cell_w / 2, y0 + cell_h / 2),
                    )?;
                }
                None => {
                    root.draw(&Rectangle::new(corner, RGBColor(226, 226, 226).filled()))?;
                }
            }
            root.draw(&Rectangle::new(corner, WHITE.stroke_width(1)))?;
        }
    }

    let row_style =
        TextStyle::from(("sans-serif", 16).into_font()).pos(Pos::new(HPos::Right, VPos::Center));
    let column_style =
        TextStyle::from(("sans-serif", 16).into_font().transform(FontTransform::Rotate90))
            .pos(Pos::new(HPos::Left, VPos::Center));
    for (i, name) in matrix.variables.iter().enumerate() {
        let i = i as i32;
        root.draw_text(
            name,
            &row_style,
            (MARGIN_LEFT - 8, MARGIN_TOP + i * cell_h + cell_h / 2),
        )?;
        root.draw_text(
            name,
            &column_style,
            (
                MARGIN_LEFT + i * cell_w + cell_w / 2,
                MARGIN_TOP + n * cell_h + 8,
            ),
        )?;
    }

    root.present()?;
    Ok(())
}

/// Blue for -1, white for 0, red for +1, linear in between.
fn diverging_color(coefficient: f64) -> RGBColor {
    let t = coefficient.clamp(-1.0, 1.0);
    let (endpoint, strength) = if t < 0.0 { (COLD, -t) } else { (WARM, t) };
    let blend = |channel: u8| {
        let white = 255.0;
        (white + (channel as f64 - white) * strength).round() as u8
    };
    RGBColor(blend(endpoint.0), blend(endpoint.1), blend(endpoint.2))
}
