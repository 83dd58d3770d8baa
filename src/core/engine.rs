use crate::core::{BirthDetailsRequest, HoroscopePipeline, HoroscopeSource, Interpreter, Reading};
use crate::utils::error::Result;
use std::time::Instant;

/// Runs the two stages of a reading: gather chart data, then interpret it.
pub struct ReadingEngine<S: HoroscopeSource, I: Interpreter> {
    pipeline: HoroscopePipeline<S>,
    interpreter: I,
}

impl<S: HoroscopeSource, I: Interpreter> ReadingEngine<S, I> {
    pub fn new(pipeline: HoroscopePipeline<S>, interpreter: I) -> Self {
        Self {
            pipeline,
            interpreter,
        }
    }

    pub async fn run(&self, details: &BirthDetailsRequest) -> Result<Reading> {
        tracing::info!(
            "🔭 Fetching chart data from {} endpoints",
            self.pipeline.endpoints().len()
        );
        let started = Instant::now();
        let chart_text = self.pipeline.gather(details).await?;
        let fetch_elapsed = started.elapsed();
        tracing::info!(
            "🔭 Chart data ready ({} bytes in {:?})",
            chart_text.len(),
            fetch_elapsed
        );

        tracing::info!("✨ Requesting interpretation");
        let started = Instant::now();
        let interpretation = self.interpreter.interpret(&chart_text).await;
        let interpret_elapsed = started.elapsed();
        tracing::info!("✨ Interpretation received in {:?}", interpret_elapsed);

        Ok(Reading {
            chart_text,
            interpretation,
            fetch_elapsed,
            interpret_elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::HoroscopeError;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct EchoSource;

    #[async_trait]
    impl HoroscopeSource for EchoSource {
        async fn fetch(&self, details: &BirthDetailsRequest, endpoint: &str) -> Result<String> {
            Ok(format!("[{}:{}]", endpoint, details.year))
        }
    }

    struct FailingSource;

    #[async_trait]
    impl HoroscopeSource for FailingSource {
        async fn fetch(&self, _details: &BirthDetailsRequest, endpoint: &str) -> Result<String> {
            Err(HoroscopeError::ApiRejected {
                endpoint: endpoint.to_string(),
                status: 500,
                body: "boom".to_string(),
            })
        }
    }

    #[derive(Clone, Default)]
    struct RecordingInterpreter {
        prompts: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Interpreter for RecordingInterpreter {
        async fn interpret(&self, prompt_text: &str) -> String {
            self.prompts.lock().await.push(prompt_text.to_string());
            format!("reading of {} bytes", prompt_text.len())
        }
    }

    fn endpoints() -> Vec<String> {
        vec!["birth_details".to_string(), "astro_details".to_string()]
    }

    #[tokio::test]
    async fn test_run_feeds_combined_text_to_interpreter() {
        let interpreter = RecordingInterpreter::default();
        let engine = ReadingEngine::new(
            HoroscopePipeline::new(EchoSource, endpoints()),
            interpreter.clone(),
        );

        let reading = engine.run(&BirthDetailsRequest::default()).await.unwrap();

        assert_eq!(reading.chart_text, "[birth_details:1997][astro_details:1997]");
        assert_eq!(reading.interpretation, "reading of 40 bytes");
        assert_eq!(
            *interpreter.prompts.lock().await,
            vec![reading.chart_text.clone()]
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_interpretation() {
        let interpreter = RecordingInterpreter::default();
        let engine = ReadingEngine::new(
            HoroscopePipeline::new(FailingSource, endpoints()),
            interpreter.clone(),
        );

        let err = engine
            .run(&BirthDetailsRequest::default())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("boom"));
        assert!(interpreter.prompts.lock().await.is_empty());
    }
}
