use clap::Parser;
use movie_genre_classifier::cli::{render_text, OutputFormat, PredictCli};
use movie_genre_classifier::{resolve_threshold, GenreModel, GenrePredictor, Result};

fn main() {
    movie_genre_classifier::logging::init();

    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = PredictCli::parse();

    let model = GenreModel::load(&cli.model)?;
    let threshold = resolve_threshold(cli.threshold, &model);
    let predictor = GenrePredictor::new(model, cli.to_config(threshold))?;
    let prediction = predictor.predict(&cli.title, &cli.description)?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&prediction)?),
        OutputFormat::Text => println!("{}", render_text(&prediction)),
    }
    Ok(())
}
