//! Tests for CSV summaries over stored batch results

#[cfg(test)]
mod tests {

    use std::collections::BTreeMap;
    use terrawave::io::batch::generate_and_save;
    use terrawave::io::configuration::{SUMMARY_AVERAGES_FILE, SUMMARY_INDIVIDUAL_FILE};
    use terrawave::io::error::AlgorithmError;
    use terrawave::io::request::{GenerateRequest, GenerationMethod};
    use terrawave::io::summary::{
        MapSummary, SummaryConfig, lag_one_autocorrelation, land_ratio, low_frequency_ratio,
        method_averages, summarize, unique_adjacency_pairs,
    };

    fn map(method: GenerationMethod, land: f64, autocorr: Option<f64>) -> MapSummary {
        MapSummary {
            file_name: format!("{method}.json"),
            method,
            entropy: Some(1.0),
            fractal_dim: Some(2.0),
            land_ratio: land,
            unique_adjacency_pairs: 4,
            autocorr_lag1: autocorr,
            low_frequency_ratio: None,
        }
    }

    // Tests land covers wet sand through forest only
    // Verified by starting the range at sand
    #[test]
    fn test_land_ratio() {
        let frequencies = BTreeMap::from([(0, 0.5), (3, 0.2), (5, 0.3)]);
        assert!((land_ratio(&frequencies) - 0.5).abs() < 1e-12);
        assert!(land_ratio(&BTreeMap::new()).abs() < f64::EPSILON);
    }

    // Tests pairs are unordered and zero counts are ignored
    // Verified by counting ordered pairs
    #[test]
    fn test_unique_adjacency_pairs() {
        let adjacency = BTreeMap::from([
            (1, BTreeMap::from([(1, 3), (2, 1)])),
            (2, BTreeMap::from([(1, 1), (4, 0)])),
        ]);
        assert_eq!(unique_adjacency_pairs(&adjacency), 2);
    }

    // Tests the lag-one mean uses whichever finite coefficients exist
    // Verified by always dividing by two
    #[test]
    fn test_lag_one_autocorrelation() {
        let both = lag_one_autocorrelation(Some(0.4), Some(0.2)).unwrap();
        assert!((both - 0.3).abs() < 1e-12);
        assert_eq!(lag_one_autocorrelation(None, Some(0.5)), Some(0.5));
        assert_eq!(lag_one_autocorrelation(Some(f64::NAN), None), None);
        assert_eq!(lag_one_autocorrelation(None, None), None);
    }

    // Tests the low band is a quarter of each axis and at least one cell
    // Verified by taking the band from the last rows instead of the first
    #[test]
    fn test_low_frequency_ratio() {
        let mut spectrum = vec![vec![1.0; 4]; 4];
        if let Some(dc) = spectrum.first_mut().and_then(|row| row.first_mut()) {
            *dc = -5.0;
        }
        let ratio = low_frequency_ratio(&spectrum).unwrap();
        assert!((ratio - 0.25).abs() < 1e-12);

        let small = low_frequency_ratio(&[vec![3.0, 1.0]]).unwrap();
        assert!((small - 0.75).abs() < 1e-12);

        assert_eq!(low_frequency_ratio(&[]), None);
        assert_eq!(low_frequency_ratio(&vec![vec![0.0; 3]; 3]), None);
    }

    // Tests averages skip missing values and keep the requested method order
    // Verified by counting missing values as zero
    #[test]
    fn test_method_averages() {
        let maps = [
            map(GenerationMethod::Terrain, 0.2, Some(0.6)),
            map(GenerationMethod::Terrain, 0.4, None),
            map(GenerationMethod::Life, 0.9, Some(0.1)),
        ];
        let averages = method_averages(&maps, &[GenerationMethod::Noise, GenerationMethod::Terrain]);

        assert_eq!(averages.len(), 2);
        let noise = averages.first().unwrap();
        assert_eq!(noise.method, GenerationMethod::Noise);
        assert_eq!(noise.sample_count, 0);
        assert_eq!(noise.land_ratio, None);

        let terrain = averages.get(1).unwrap();
        assert_eq!(terrain.sample_count, 2);
        assert!((terrain.land_ratio.unwrap() - 0.3).abs() < 1e-12);
        assert!((terrain.autocorr_lag1.unwrap() - 0.6).abs() < 1e-12);
        assert!((terrain.unique_adjacency_pairs.unwrap() - 4.0).abs() < 1e-12);
        assert_eq!(terrain.low_frequency_ratio, None);
    }

    // Tests stored batch records are read back and both tables are written
    // Verified by stopping at the first unreadable record
    #[test]
    fn test_summarize_batch_output() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        for (method, name) in [
            (GenerationMethod::Terrain, "terrain/a.json"),
            (GenerationMethod::Noise, "noise/b.json"),
        ] {
            let path = input.path().join(name);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            generate_and_save(&GenerateRequest::new(method, 6, 5), &path).unwrap();
        }
        std::fs::write(input.path().join("noise/broken.json"), "{").unwrap();
        std::fs::write(input.path().join("noise/notes.txt"), "ignored").unwrap();

        let config = SummaryConfig {
            input_dir: input.path().to_path_buf(),
            output_dir: output.path().to_path_buf(),
            methods: vec![
                GenerationMethod::Terrain,
                GenerationMethod::Noise,
                GenerationMethod::Wfc,
            ],
        };
        let averages = summarize(&config).unwrap();
        let counts: Vec<_> = averages.iter().map(|row| row.sample_count).collect();
        assert_eq!(counts, [1, 1, 0]);

        let individual =
            std::fs::read_to_string(output.path().join(SUMMARY_INDIVIDUAL_FILE)).unwrap();
        let lines: Vec<_> = individual.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.first().unwrap().starts_with("FilePath,Method,Entropy"));
        assert!(lines.get(1).unwrap().starts_with("a.json,terrain,"));
        assert!(lines.get(2).unwrap().starts_with("b.json,noise,"));

        let averages_csv =
            std::fs::read_to_string(output.path().join(SUMMARY_AVERAGES_FILE)).unwrap();
        assert_eq!(
            averages_csv.lines().last(),
            Some("wfc,NaN,NaN,NaN,NaN,NaN,NaN,0")
        );
    }

    // Tests an empty input directory writes no tables
    // Verified by writing header-only tables
    #[test]
    fn test_summarize_without_results() {
        let dir = tempfile::tempdir().unwrap();
        let config = SummaryConfig {
            input_dir: dir.path().join("missing"),
            output_dir: dir.path().to_path_buf(),
            methods: vec![GenerationMethod::Wfc],
        };
        assert!(summarize(&config).unwrap().is_empty());
        assert!(!dir.path().join(SUMMARY_INDIVIDUAL_FILE).exists());
    }

    // Tests a file that is not a batch record is a serialization error
    // Verified by defaulting the whole record
    #[test]
    fn test_read_rejects_other_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.json");
        std::fs::write(&path, r#"{"grid": []}"#).unwrap();
        assert!(matches!(
            MapSummary::read(&path),
            Err(AlgorithmError::Serialization { .. })
        ));
    }
}
