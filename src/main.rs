use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_digest::cli::{run_interactive, spawn_progress, Cli, Commands, OutputFormat};
use yt_digest::{
    extract_video_id, output, utils, Config, DigestError, GeminiSummarizer, RequestState,
    SubmissionInput, SummaryPipeline, YoutubeTranscriptSource,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    match cli.command {
        Commands::Summarize {
            url,
            focus,
            api_key,
            output,
            save,
            format,
        } => {
            let config = Config::load(cli.config.as_deref()).await?;
            let format = match format {
                Some(format) => format,
                None => config.app.default_output_format.parse::<OutputFormat>()?,
            };
            let pipeline = build_pipeline(&config)?;

            tracing::info!("Starting summary for URL: {}", url);

            let progress = spawn_progress(pipeline.subscribe(), cli.quiet);
            let settled = pipeline
                .submit(SubmissionInput::new(url, api_key, focus))
                .await;
            if let Err(e) = progress.await {
                tracing::debug!("Progress indicator task failed: {}", e);
            }

            let result = match settled {
                Some(RequestState::Succeeded(result)) => result,
                Some(RequestState::Failed(err)) => return Err(user_facing(err)),
                _ => {
                    let err = DigestError::Unexpected("request did not settle".into());
                    return Err(user_facing(err));
                }
            };

            let path = match output {
                Some(path) => Some(path),
                None if save => {
                    let filename = utils::default_summary_filename(
                        result.video_id.as_str(),
                        format.extension(),
                    );
                    Some(std::env::current_dir()?.join(filename))
                }
                None => None,
            };

            match path {
                Some(path) => {
                    output::save_to_file(&result, &path, format)
                        .await
                        .with_context(|| format!("Failed to save summary to {}", path.display()))?;
                    println!("Summary saved to: {}", path.display());
                }
                None => output::print_to_console(&result, format)?,
            }
        }
        Commands::Interactive { api_key } => {
            let config = Config::load(cli.config.as_deref()).await?;
            let pipeline = build_pipeline(&config)?;
            run_interactive(&pipeline, api_key, cli.quiet).await?;
        }
        Commands::Id { url } => {
            let video_id = extract_video_id(&url).ok_or(DigestError::InvalidUrl)?;
            println!("{}", video_id);
        }
        Commands::Config { show } => {
            let config = Config::load(cli.config.as_deref()).await?;
            if show {
                config.display();
            } else {
                let path = match &cli.config {
                    Some(path) => path.clone(),
                    None => Config::config_path()?,
                };
                println!("Edit the configuration file to change settings:");
                println!("  {}", path.display());
            }
        }
    }

    Ok(())
}

fn init_tracing(cli: &Cli) {
    let default_filter = if cli.verbose {
        "yt_digest=debug"
    } else if cli.quiet {
        "yt_digest=warn"
    } else {
        "yt_digest=info"
    };

    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_filter.into()),
    );

    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Surface only the message meant for the user; details stay in the logs
fn user_facing(err: DigestError) -> anyhow::Error {
    tracing::debug!("Request failed: {}", err);
    anyhow::anyhow!("{}", err.user_message())
}

fn build_pipeline(
    config: &Config,
) -> Result<SummaryPipeline<YoutubeTranscriptSource, GeminiSummarizer>> {
    let source =
        YoutubeTranscriptSource::new(config.transcript.preserve_formatting).map_err(user_facing)?;
    let summarizer = GeminiSummarizer::new(config.summarizer.endpoint.clone());

    Ok(SummaryPipeline::new(
        source,
        summarizer,
        config.transcript.language.clone(),
    ))
}
