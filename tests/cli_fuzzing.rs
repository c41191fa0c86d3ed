use arbitrary::Arbitrary;
use clap::Parser;
use thumbdir::cli::Cli;
use thumbdir::cli::to_args::ToArgs;

#[test]
fn fuzz_cli_args_roundtrip() {
    let mut data = vec![42u8; 1024];
    let mut rng = arbitrary::Unstructured::new(&data);

    for i in 0..100 {
        let cli = match Cli::arbitrary(&mut rng) {
            Ok(cli) => cli,
            Err(_) => {
                data = vec![i as u8; 1024];
                rng = arbitrary::Unstructured::new(&data);
                Cli::arbitrary(&mut rng).expect("Failed to generate CLI instance")
            }
        };

        let args = cli.to_args();

        let mut full_args = vec!["test-exe".into()];
        full_args.extend(args);

        let parsed_cli = match Cli::try_parse_from(&full_args) {
            Ok(parsed) => parsed,
            Err(e) => panic!(
                "Failed to parse CLI args on iteration {}: {}\nOriginal CLI: {:?}\nArgs: {:?}",
                i, e, cli, full_args
            ),
        };

        if cli != parsed_cli {
            panic!(
                "CLI roundtrip failed on iteration {}:\nOriginal: {:?}\nParsed: {:?}\nArgs: {:?}",
                i, cli, parsed_cli, full_args
            );
        }
    }
}

#[test]
fn dash_leading_positionals_roundtrip_with_options() {
    let cli = Cli::try_parse_from([
        "thumbdir",
        "--filter",
        "gaussian",
        "--quality",
        "42",
        "--",
        "-photos",
        "--thumbs",
        "64",
        "48",
    ])
    .unwrap();
    assert_eq!(cli.thumbnail_args.source_dir.to_str(), Some("-photos"));
    assert_eq!(cli.thumbnail_args.dest_dir.to_str(), Some("--thumbs"));
    assert_eq!(
        cli.thumbnail_args.filter,
        thumbdir::resample_filter::ResampleFilter::Gaussian
    );

    let mut args = vec!["thumbdir".into()];
    args.extend(cli.to_args());
    assert_eq!(Cli::try_parse_from(&args).unwrap(), cli);
}
