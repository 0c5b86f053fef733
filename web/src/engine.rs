use gambit_core::{EngineCall, EngineError, Reply};
use gambit_protocol::{EngineReply, Endpoint, LegalMovesRequest, MoveRequest, StartRequest};
use gloo::net::http::Request;
use serde::{Serialize, de::DeserializeOwned};

/// Talks to the chess engine over JSON `POST` requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HttpEngine {
    base_url: String,
}

impl HttpEngine {
    pub(crate) fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    pub(crate) async fn execute(&self, call: EngineCall) -> Result<Reply, EngineError> {
        let endpoint = call.endpoint();
        match call {
            EngineCall::Start(difficulty) => self
                .post(endpoint, Some(&StartRequest { difficulty }))
                .await
                .map(Reply::Board),
            EngineCall::Move(intent) => {
                let body = MoveRequest {
                    from: intent.from().id(),
                    to: intent.to().id(),
                };
                self.post(endpoint, Some(&body)).await.map(Reply::Moved)
            }
            EngineCall::LegalMoves(from) => self
                .post(endpoint, Some(&LegalMovesRequest { from: from.id() }))
                .await
                .map(Reply::Destinations),
            EngineCall::Undo | EngineCall::Reset => self
                .post::<(), _>(endpoint, None)
                .await
                .map(Reply::Board),
        }
    }

    async fn post<B, T>(&self, endpoint: Endpoint, body: Option<&B>) -> Result<T, EngineError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint);
        log::debug!("POST {}", url);

        let builder = Request::post(&url);
        let response = match body {
            Some(body) => builder.json(body).map_err(transport)?.send().await,
            None => builder.send().await,
        }
        .map_err(transport)?;

        let status = response.status();
        let text = response.text().await.map_err(transport)?;
        log::trace!("{} -> {}: {}", url, status, text);
        decode_reply(status, &text)
    }
}

fn transport(err: gloo::net::Error) -> EngineError {
    EngineError::Transport(err.to_string())
}

/// An error body is a rejection whatever the status; anything else needs a 2xx.
fn decode_reply<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, EngineError> {
    let success = (200..300).contains(&status);
    match serde_json::from_str::<EngineReply<T>>(body) {
        Ok(reply) => match reply.into_result() {
            Err(message) => Err(EngineError::Rejected(message)),
            Ok(value) if success => Ok(value),
            Ok(_) => Err(EngineError::Transport(format!("HTTP {}", status))),
        },
        Err(err) if success => Err(EngineError::Undecodable(err.to_string())),
        Err(_) => Err(EngineError::Transport(format!("HTTP {}", status))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gambit_protocol::{BoardResponse, LegalMovesResponse, StatusCategory};

    #[test]
    fn strips_trailing_slashes_from_base_url() {
        let engine = HttpEngine::new("http://localhost:5000/");
        assert_eq!(engine.url(Endpoint::LegalMoves), "http://localhost:5000/legal_moves");
        assert_eq!(HttpEngine::new("").url(Endpoint::Start), "/start");
    }

    #[test]
    fn decodes_successful_board() {
        let reply: BoardResponse = decode_reply(
            200,
            r#"{"board":{"4":"K","60":"k"},"status":"Check!","category":"check"}"#,
        )
        .unwrap();
        assert_eq!(reply.board.len(), 2);
        assert_eq!(reply.category(), StatusCategory::Check);
    }

    #[test]
    fn error_body_is_a_rejection_even_with_bad_status() {
        let err = decode_reply::<LegalMovesResponse>(400, r#"{"error":"Illegal move"}"#).unwrap_err();
        assert_eq!(err, EngineError::Rejected("Illegal move".into()));
    }

    #[test]
    fn non_success_without_error_body_is_transport() {
        let err = decode_reply::<LegalMovesResponse>(502, "<html>Bad gateway</html>").unwrap_err();
        assert_eq!(err, EngineError::Transport("HTTP 502".into()));
    }

    #[test]
    fn garbage_on_success_is_undecodable() {
        let err = decode_reply::<LegalMovesResponse>(200, "{}").unwrap_err();
        assert!(matches!(err, EngineError::Undecodable(_)));
    }
}
