use super::service::{QueryOutcome, QueryService};
use super::types::*;
use crate::config::Config;
use crate::guard::types::Fingerprint;
use crate::search::types::MatchStage;

use axum::extract::ConnectInfo;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Timelike;
use std::net::SocketAddr;
use std::sync::Arc;

pub fn router(service: Arc<QueryService>, config: Arc<Config>) -> Router {
    Router::new()
        .route("/api", post(handle_question))
        .route("/greet", get(handle_greet))
        .route("/data-request", get(handle_data_request))
        .layer(Extension(service))
        .layer(Extension(config))
}

pub async fn handle_question(
    Extension(service): Extension<Arc<QueryService>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(req): Json<QuestionRequest>,
) -> (StatusCode, Json<QuestionResponse>) {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let fingerprint = Fingerprint::new(user_agent, peer.ip().to_string());

    let outcome = service
        .answer(req.user_question.as_deref(), &fingerprint)
        .await;

    (StatusCode::OK, Json(to_response(outcome)))
}

pub fn to_response(outcome: QueryOutcome) -> QuestionResponse {
    match outcome {
        QueryOutcome::EmptyQuestion => QuestionResponse::message(MSG_ASK_QUESTION),
        QueryOutcome::Farewell => QuestionResponse::message(MSG_FAREWELL),
        QueryOutcome::NotFound => QuestionResponse::message(MSG_NOT_FOUND),
        QueryOutcome::Fallback(examples) => QuestionResponse {
            message: Some(MSG_FALLBACK.to_string()),
            answer: Some(
                examples
                    .into_iter()
                    .map(|record| AnswerItem::Topic {
                        title: record.name,
                        link: None,
                    })
                    .collect(),
            ),
        },
        QueryOutcome::Found(matches) => {
            let stage = matches.stage;
            let items = matches
                .records
                .into_iter()
                .map(|record| match stage {
                    Some(MatchStage::Similarity) => AnswerItem::Dataset {
                        name: record.name,
                        link: record.address,
                    },
                    _ => AnswerItem::Topic {
                        title: record.name,
                        link: Some(record.address),
                    },
                })
                .collect();
            QuestionResponse {
                message: None,
                answer: Some(items),
            }
        }
    }
}

pub async fn handle_greet() -> Json<GreetingResponse> {
    let hour = chrono::Local::now().hour();
    Json(GreetingResponse {
        greeting: greeting_for_hour(hour).to_string(),
        message: MSG_WELCOME.to_string(),
    })
}

/// Morning from 05:00, day from 12:00, evening from 18:00.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Günaydın!",
        12..=17 => "İyi günler!",
        _ => "İyi akşamlar!",
    }
}

pub async fn handle_data_request(
    Extension(config): Extension<Arc<Config>>,
) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!(
            "Veri isteği yapmak için bu linke başvurabilirsiniz: {}",
            config.data_request_url
        ),
    })
}
