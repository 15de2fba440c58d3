//! Tests for command-line parsing and request building

#[cfg(test)]
mod tests {
    use clap::Parser;
    use terrawave::io::cli::{Cli, Command};
    use terrawave::io::configuration::{BATCH_MAPS_PER_METHOD, BATCH_OUTPUT_DIR, DEFAULT_ITERATIONS};
    use terrawave::io::request::GenerationMethod;

    fn generate_args(argv: &[&str]) -> terrawave::io::cli::GenerateArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        let Command::Generate(args) = cli.command else {
            unreachable!("expected the generate command");
        };
        args
    }

    // Tests generate defaults to the solver on a 25x25 grid
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_generate_defaults() {
        let args = generate_args(&["terrawave", "generate"]);
        assert_eq!(args.method, GenerationMethod::Wfc);
        assert_eq!((args.width, args.height), (25, 25));
        assert_eq!(args.iterations, DEFAULT_ITERATIONS);
        assert!(args.seed.is_none());
        assert!(!args.border_water);

        let request = args.to_request().unwrap();
        assert_eq!(request.generation_method, GenerationMethod::Wfc);
        assert!(request.painted_tiles.is_empty());
    }

    // Tests options map onto request fields, including method aliases
    // Verified by not forwarding the seed to the solver
    #[test]
    fn test_generate_options() {
        let args = generate_args(&[
            "terrawave",
            "generate",
            "-m",
            "mlca",
            "-w",
            "12",
            "-H",
            "9",
            "-s",
            "7",
            "-r",
            "0.4",
            "--island",
            "--max-retries",
            "10",
        ]);
        let request = args.to_request().unwrap();

        assert_eq!(request.generation_method, GenerationMethod::Terrain);
        assert_eq!((request.width, request.height), (12, 9));
        assert_eq!(request.seed, Some(7));
        assert_eq!(request.wfc_seed, Some(7));
        assert_eq!(request.wfc_max_retries, Some(10));
        assert!(request.wfc_island);
        assert!((request.randomness_factor - 0.4).abs() < f64::EPSILON);
    }

    // Tests painted JSON files and whole request files are read
    // Verified by ignoring the request file
    #[test]
    fn test_request_files() {
        let dir = tempfile::tempdir().unwrap();
        let painted = dir.path().join("painted.json");
        std::fs::write(&painted, "[[-1, 2], [3, -1]]").unwrap();

        let painted_str = painted.to_string_lossy().into_owned();
        let args = generate_args(&["terrawave", "generate", "-p", &painted_str]);
        assert_eq!(
            args.to_request().unwrap().painted_tiles,
            vec![vec![-1, 2], vec![3, -1]]
        );

        let request_file = dir.path().join("request.json");
        std::fs::write(
            &request_file,
            r#"{"generationMethod":"ca","width":4,"height":3,"iterations":2}"#,
        )
        .unwrap();
        let request_str = request_file.to_string_lossy().into_owned();
        let request = generate_args(&["terrawave", "generate", "--request", &request_str])
            .to_request()
            .unwrap();
        assert_eq!(request.generation_method, GenerationMethod::Life);
        assert_eq!(request.iterations, 2);

        let missing = dir.path().join("missing.json").to_string_lossy().into_owned();
        assert!(
            generate_args(&["terrawave", "generate", "--request", &missing])
                .to_request()
                .is_err()
        );
    }

    // Tests batch defaults and comma-separated methods
    // Verified by removing the value delimiter
    #[test]
    fn test_batch_args() {
        let cli = Cli::try_parse_from(["terrawave", "-q", "batch", "-m", "noise,ca", "-n", "5"])
            .unwrap();
        assert!(cli.quiet);
        assert!(!cli.should_show_progress());
        let Command::Batch(args) = cli.command else {
            unreachable!("expected the batch command");
        };
        assert_eq!(args.methods, vec![GenerationMethod::Noise, GenerationMethod::Life]);
        assert_eq!(args.maps, 5);

        let cli = Cli::try_parse_from(["terrawave", "batch"]).unwrap();
        let Command::Batch(args) = cli.command else {
            unreachable!("expected the batch command");
        };
        assert_eq!(args.methods.len(), 3);
        assert_eq!(args.maps, BATCH_MAPS_PER_METHOD);
    }

    // Tests the analyze command reads the batch directory by default
    // Verified by defaulting the input to the working directory
    #[test]
    fn test_analyze_args() {
        let cli = Cli::try_parse_from(["terrawave", "analyze"]).unwrap();
        let Command::Analyze(args) = cli.command else {
            unreachable!("expected the analyze command");
        };
        assert_eq!(args.input_dir, std::path::PathBuf::from(BATCH_OUTPUT_DIR));
        assert_eq!(args.output_dir, std::path::PathBuf::from("."));
        assert_eq!(args.methods.len(), 3);

        let cli = Cli::try_parse_from(["terrawave", "analyze", "-i", "maps", "-m", "wfc"]).unwrap();
        let Command::Analyze(args) = cli.command else {
            unreachable!("expected the analyze command");
        };
        assert_eq!(args.input_dir, std::path::PathBuf::from("maps"));
        assert_eq!(args.methods, vec![GenerationMethod::Wfc]);
    }

    // Tests unknown methods are rejected by the parser
    // Verified by accepting arbitrary method strings
    #[test]
    fn test_unknown_method() {
        assert!(Cli::try_parse_from(["terrawave", "generate", "-m", "voronoi"]).is_err());
        assert!(Cli::try_parse_from(["terrawave"]).is_err());
    }
}
