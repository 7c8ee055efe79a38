#[cfg(test)]
mod tests {
    use crate::io::loaders::{WeatherEncoding, WeatherFolderLoader};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_folder_tags_month_keys() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Janvier.csv"), "Temp (°C)\n-10\n-12\n").unwrap();
        fs::write(dir.path().join("Juin.csv"), "Temp (°C)\n18\n22\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        let report = WeatherFolderLoader::load_folder(dir.path(), WeatherEncoding::Utf8).unwrap();

        assert_eq!(report.files.len(), 2);
        assert!(report.failures.is_empty());
        let mut keys: Vec<&str> = report
            .files
            .iter()
            .map(|f| f.month_key.as_str())
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["janvier", "juin"]);
    }

    #[test]
    fn test_load_folder_collects_failures_and_continues() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("fevrier.csv"), "Temp (°C)\n-5\n").unwrap();
        // Empty file: the CSV reader rejects it
        fs::write(dir.path().join("broken.csv"), "").unwrap();

        let report = WeatherFolderLoader::load_folder(dir.path(), WeatherEncoding::Utf8).unwrap();

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].month_key, "fevrier");
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("broken.csv"));
    }

    #[test]
    fn test_load_folder_latin1() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("mars.csv"),
            b"Temp (\xb0C),Hum. rel (%)\n2,70\n",
        )
        .unwrap();

        let report =
            WeatherFolderLoader::load_folder(dir.path(), WeatherEncoding::Latin1).unwrap();

        assert_eq!(report.files.len(), 1);
        let df = &report.files[0].dataframe;
        assert!(df.get_column_names_str().contains(&"Temp (°C)"));
    }

    #[test]
    fn test_load_folder_missing_dir_is_fatal() {
        let result = WeatherFolderLoader::load_folder(
            std::path::Path::new("no/such/folder"),
            WeatherEncoding::Utf8,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_report() {
        let dir = tempdir().unwrap();
        let report = WeatherFolderLoader::load_folder(dir.path(), WeatherEncoding::Utf8).unwrap();
        assert!(report.is_empty());
    }
}
