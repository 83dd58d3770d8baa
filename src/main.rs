use clap::Parser;
use horoscope_groq::config::toml_config::mask_secret;
use horoscope_groq::utils::error::ErrorSeverity;
use horoscope_groq::utils::{logger, validation::Validate};
use horoscope_groq::{
    AppConfig, AstrologyApiService, CliArgs, GroqAiService, HoroscopePipeline, ReadingEngine,
};

const OPENING_BANNER: &str = "================ AI INTERPRETATION ================";
const CLOSING_BANNER: &str = "===================================================";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting horoscope-groq");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if args.dry_run {
        display_config_summary(&config);
        return Ok(());
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let client = reqwest::Client::new();
    let source = AstrologyApiService::with_client(client.clone(), &config.astrology);
    let interpreter = GroqAiService::with_client(client, &config.groq);
    let pipeline = HoroscopePipeline::new(source, config.astrology.endpoints.clone())
        .with_fetch_mode(config.pipeline.fetch_mode)
        .with_combine_mode(config.pipeline.combine);
    let engine = ReadingEngine::new(pipeline, interpreter);

    let exit_code = match engine.run(&config.birth).await {
        Ok(reading) => {
            tracing::info!(
                "✅ Reading complete (fetch {:?}, interpret {:?})",
                reading.fetch_elapsed,
                reading.interpret_elapsed
            );
            println!("\n{}\n", OPENING_BANNER);
            println!("{}", reading.interpretation);
            println!("\n{}\n", CLOSING_BANNER);
            0
        }
        Err(e) => {
            tracing::error!(
                "❌ Reading failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            println!("Error: {}", e);

            match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            }
        }
    };

    if !args.no_wait {
        wait_for_enter()?;
    }

    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

fn wait_for_enter() -> std::io::Result<()> {
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(())
}

fn display_config_summary(config: &AppConfig) {
    let birth = &config.birth;

    println!("📋 Configuration Summary:");
    println!("  Astrology API: {}", config.astrology.base_url);
    println!("    User ID: {}", mask_secret(&config.astrology.user_id));
    println!("    API Key: {}", mask_secret(&config.astrology.api_key));
    println!("    Endpoints: {}", config.astrology.endpoints.join(", "));
    println!("  Chat API: {}", config.groq.base_url);
    println!("    Model: {}", config.groq.model);
    println!("    API Key: {}", mask_secret(&config.groq.api_key));
    println!(
        "    Max tokens: {}, Temperature: {}",
        config.groq.max_output_tokens, config.groq.temperature
    );
    println!(
        "  Birth: {:02}/{:02}/{} {:02}:{:02} at ({}, {}) tz {}",
        birth.day,
        birth.month,
        birth.year,
        birth.hour,
        birth.minute,
        birth.latitude,
        birth.longitude,
        birth.timezone_offset
    );
    println!(
        "  Fetch mode: {:?}, Combine: {:?}",
        config.pipeline.fetch_mode, config.pipeline.combine
    );
    println!("  🔍 DRY RUN - no requests sent");
}
