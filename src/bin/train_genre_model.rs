use clap::Parser;
use movie_genre_classifier::cli::TrainCli;
use movie_genre_classifier::model::train::load_jsonl;
use movie_genre_classifier::{Result, TextPipeline, Trainer};
use tracing::info;

fn main() {
    movie_genre_classifier::logging::init();

    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = TrainCli::parse();

    let examples = load_jsonl(&cli.data)?;
    let pipeline = TextPipeline::new(cli.to_config());
    let model = Trainer::new(&pipeline, cli.to_options()).train(&examples)?;
    model.save(&cli.output)?;

    info!(
        output = %cli.output.display(),
        genres = ?model.genres(),
        features = model.vectorizer().vocabulary_len(),
        "model written"
    );
    Ok(())
}
