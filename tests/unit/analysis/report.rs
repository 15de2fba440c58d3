//! Tests for the aggregated metrics report

#[cfg(test)]
mod tests {

    use ndarray::array;
    use terrawave::analysis::report::MetricsReport;

    // Tests the report combines every metric with string lag keys
    // Verified by formatting lag keys with a space after the comma
    #[test]
    fn test_compute_report() {
        let grid = array![[0_u8, 1, 1], [2, 1, 0]];
        let report = MetricsReport::compute(&grid, 1);

        assert_eq!(report.autocorr.len(), 4);
        assert!(report.autocorr.contains_key("0,1"));
        assert!(report.autocorr.contains_key("1,0"));
        assert_eq!(report.spectrum.len(), 2);
        assert!(report.spectrum.iter().all(|row| row.len() == 3));
        assert_eq!(report.cluster_sizes.iter().sum::<usize>(), 6);
        assert_eq!(report.frequencies.len(), 3);
    }

    // Tests JSON field names are camelCase
    // Verified by removing the rename attribute
    #[test]
    fn test_json_field_names() {
        let report = MetricsReport::compute(&array![[3_u8, 4], [4, 5]], 1);
        let json = serde_json::to_value(&report).unwrap();

        for key in [
            "entropy",
            "adjacency",
            "frequencies",
            "autocorr",
            "fractalDim",
            "spectrum",
            "clusterSizes",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json.get("fractal_dim").is_none());

        let decoded: MetricsReport = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.cluster_sizes, report.cluster_sizes);
    }
}
