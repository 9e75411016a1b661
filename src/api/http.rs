//! `reqwest` implementation of [`ExamApi`].
//!
//! The bearer token is attached with `RequestBuilder::bearer_auth`, which
//! marks the header sensitive so it is redacted from reqwest's own logging.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, warn};
use url::Url;

use crate::config::Config;
use crate::error::{DrillError, Result};
use crate::exam::{ExamRecord, FavoriteSet, IncorrectSet, UserAnswers};
use crate::session::Session;
use crate::types::QuestionId;

use super::{
    AnswersEnvelope, ApiError, ExamApi, FavoriteRequest, FavoriteToggled, FavoritesEnvelope,
    IncorrectEnvelope, SaveAnswerRequest, SubmissionResult, SubmitRequest, answers_from_records,
    favorites_from_records,
};

const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HttpExamApi {
    client: Client,
    base: Url,
}

impl HttpExamApi {
    /// Create a client for the backend at `base_url`.
    ///
    /// `timeout` bounds each whole request; connecting is capped at 10s.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| DrillError::Config(format!("invalid api_url '{base_url}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(DrillError::Config(format!(
                "api_url '{base_url}' cannot be used as a base URL"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(MAX_CONNECT_TIMEOUT))
            .build()?;

        Ok(Self { client, base })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url(), config.request_timeout())
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                DrillError::Config(format!("api_url '{}' cannot be used as a base URL", self.base))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, session: &Session, request: RequestBuilder) -> Result<T> {
        let request = match session.bearer() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = ApiError::from_body(status, &body);
            if error.is_transient() {
                warn!(status = status.as_u16(), message = %error.message, "backend unavailable");
            } else {
                debug!(status = status.as_u16(), message = %error.message, "backend request failed");
            }
            return Err(error.into());
        }

        Ok(response.json::<T>().await?)
    }
}

impl ExamApi for HttpExamApi {
    async fn fetch_exam(&self, session: &Session) -> Result<ExamRecord> {
        let url = self.endpoint(&["api", "exams", session.exam_id()])?;
        self.send(session, self.client.get(url)).await
    }

    async fn fetch_answers(&self, session: &Session) -> Result<UserAnswers> {
        let url = self.endpoint(&["api", "get-answers", session.exam_id()])?;
        let envelope: AnswersEnvelope = self.send(session, self.client.get(url)).await?;
        Ok(answers_from_records(envelope.answers))
    }

    async fn save_answer(
        &self,
        session: &Session,
        question: QuestionId,
        selected: &[usize],
    ) -> Result<()> {
        let url = self.endpoint(&["api", "save-answer"])?;
        let body = SaveAnswerRequest {
            exam_id: session.exam_id(),
            topic_number: question.topic,
            question_index: question.index,
            selected_options: selected,
        };
        let _: IgnoredAny = self.send(session, self.client.post(url).json(&body)).await?;
        Ok(())
    }

    async fn fetch_favorites(&self, session: &Session) -> Result<FavoriteSet> {
        let url = self.endpoint(&["api", "favorites", session.exam_id()])?;
        let envelope: FavoritesEnvelope = self.send(session, self.client.get(url)).await?;
        Ok(favorites_from_records(envelope.favorites))
    }

    async fn toggle_favorite(&self, session: &Session, question: QuestionId) -> Result<bool> {
        let url = self.endpoint(&["api", "favorite"])?;
        let body = FavoriteRequest {
            exam_id: session.exam_id(),
            topic_number: question.topic,
            question_index: question.index,
        };
        let toggled: FavoriteToggled = self.send(session, self.client.post(url).json(&body)).await?;
        Ok(toggled.is_favorite)
    }

    async fn fetch_incorrect(&self, session: &Session) -> Result<IncorrectSet> {
        let url = self.endpoint(&["api", "incorrect-questions", session.exam_id()])?;
        let envelope: IncorrectEnvelope = self.send(session, self.client.get(url)).await?;
        Ok(IncorrectSet::new(envelope.incorrect_questions))
    }

    async fn submit_answers(
        &self,
        session: &Session,
        answers: &UserAnswers,
    ) -> Result<SubmissionResult> {
        let url = self.endpoint(&["api", "submit-answers"])?;
        let body = SubmitRequest::new(session.exam_id(), answers);
        self.send(session, self.client.post(url).json(&body)).await
    }
}
