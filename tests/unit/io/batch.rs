//! Tests for batch planning and result files

#[cfg(test)]
mod tests {

    use terrawave::io::batch::{BatchConfig, BatchRunner, generate_and_save, plan};
    use terrawave::io::request::{GenerateRequest, GenerationMethod};

    // Tests the terrain sweep crosses iterations with randomness
    // Verified by formatting randomness without fixed precision
    #[test]
    fn test_terrain_plan() {
        let items = plan(&BatchConfig::new("out"), GenerationMethod::Terrain);
        assert_eq!(items.len(), 100);

        let first = items.first().unwrap();
        assert_eq!(first.file_name, "terrain_iter_1_rand_0.00.json");
        assert_eq!(first.request.iterations, 1);

        let last = items.last().unwrap();
        assert_eq!(last.file_name, "terrain_iter_10_rand_0.90.json");
        assert!((last.request.randomness_factor - 0.9).abs() < 1e-9);
    }

    // Tests the noise sweep crosses scale with octaves
    // Verified by starting the scale at zero
    #[test]
    fn test_noise_plan() {
        let items = plan(&BatchConfig::new("out"), GenerationMethod::Noise);
        assert_eq!(items.len(), 100);
        assert_eq!(
            items.first().map(|i| i.file_name.as_str()),
            Some("noise_scale_0.20_oct_1.json")
        );
        assert_eq!(
            items.last().map(|i| i.file_name.as_str()),
            Some("noise_scale_2.00_oct_10.json")
        );
        assert!(items.iter().all(|i| i.request.noise_persistence.is_some()));
    }

    // Tests seed sweeps and the per-method cap
    // Verified by ignoring maps_per_method
    #[test]
    fn test_seed_plans_are_capped() {
        let config = BatchConfig {
            maps_per_method: 3,
            ..BatchConfig::new("out")
        };
        let wfc = plan(&config, GenerationMethod::Wfc);
        let names: Vec<_> = wfc.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, ["wfc_seed_1.json", "wfc_seed_2.json", "wfc_seed_3.json"]);
        assert_eq!(wfc.get(1).and_then(|i| i.request.wfc_seed), Some(2));

        assert_eq!(plan(&config, GenerationMethod::Terrain).len(), 3);
        let life = plan(&config, GenerationMethod::Life);
        assert_eq!(life.last().and_then(|i| i.request.seed), Some(3));
    }

    // Tests a saved result holds the request, metrics and timing
    // Verified by writing only the response
    #[test]
    fn test_generate_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        let request = GenerateRequest::new(GenerationMethod::Terrain, 6, 5);

        generate_and_save(&request, &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["requestParams"]["generationMethod"], "terrain");
        assert_eq!(json["responseMetrics"]["grid"].as_array().map(Vec::len), Some(5));
        assert!(json["generationTimeMs"].is_u64());
    }

    // Tests the runner writes one file per map into method directories
    // Verified by writing every file into the root directory
    #[test]
    fn test_runner_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = BatchConfig {
            methods: vec![GenerationMethod::Noise, GenerationMethod::Life],
            maps_per_method: 2,
            width: 5,
            height: 5,
            ..BatchConfig::new(dir.path())
        };
        let mut runner = BatchRunner::new(config, false);
        let summary = runner.run().unwrap();

        assert_eq!(summary.written, 4);
        assert_eq!(summary.failed, 0);
        assert!(dir.path().join("noise/noise_scale_0.20_oct_2.json").exists());
        assert!(dir.path().join("life/life_seed_2.json").exists());
        assert_eq!(runner.config().maps_per_method, 2);
    }

    // Tests a failing map is counted and the sweep continues
    // Verified by propagating the first map error
    #[test]
    fn test_runner_counts_failures() {
        let dir = tempfile::tempdir().unwrap();
        let config = BatchConfig {
            methods: vec![GenerationMethod::Wfc],
            maps_per_method: 2,
            width: 0,
            height: 5,
            ..BatchConfig::new(dir.path())
        };
        let summary = BatchRunner::new(config, false).run().unwrap();
        assert_eq!(summary.written, 0);
        assert_eq!(summary.failed, 2);
    }
}
