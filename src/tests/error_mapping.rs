// Upstream failures map to the query error taxonomy; bad input never reaches upstream.

#[cfg(test)]
mod test {
    use std::time::Duration;

    use httpmock::prelude::*;
    use serde_json::json;

    use crate::cache::token_store::MemoryTokenStore;
    use crate::errors::{QueryError, ValidationError};
    use crate::query::kind::QueryKind;
    use crate::tests::common::{
        memory_dispatcher, memory_dispatcher_with, upstream_config, valid_token, AUTH_PATH,
        CPF_PATH, PROCESS_PATH, VALID_CPF, VALID_PROCESS_NUMBER,
    };

    async fn server_answering(path: &str, status: u16, body: &str) -> MockServer {
        let server = MockServer::start_async().await;
        let path = path.to_owned();
        let body = body.to_owned();
        server
            .mock_async(move |when, then| {
                when.method(POST).path(path);
                then.status(status).body(body);
            })
            .await;
        server
    }

    #[tokio::test]
    async fn upstream_401_is_an_auth_error() {
        let server = server_answering(CPF_PATH, 401, "{\"error\":\"expired\"}").await;
        let dispatcher = memory_dispatcher(&server.base_url(), "revoked");

        let err = dispatcher.query(QueryKind::Cpf, VALID_CPF).await.unwrap_err();
        assert!(matches!(err, QueryError::UpstreamAuth(_)));
    }

    #[tokio::test]
    async fn upstream_401_does_not_force_a_refresh() {
        let server = MockServer::start_async().await;
        let auth_mock = server
            .mock_async(|when, then| {
                when.method(POST).path(AUTH_PATH);
                then.status(200).json_body(json!({"accessToken": "new"}));
            })
            .await;
        let query_mock = server
            .mock_async(|when, then| {
                when.method(POST).path(CPF_PATH);
                then.status(401);
            })
            .await;

        let dispatcher = memory_dispatcher(&server.base_url(), "locally-valid");
        for _ in 0..2 {
            let err = dispatcher.query(QueryKind::Cpf, VALID_CPF).await.unwrap_err();
            assert!(matches!(err, QueryError::UpstreamAuth(_)));
        }

        auth_mock.assert_hits_async(0).await;
        query_mock.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn upstream_404_is_not_found() {
        let server = server_answering(PROCESS_PATH, 404, "").await;
        let dispatcher = memory_dispatcher(&server.base_url(), "t");

        let err = dispatcher
            .query(QueryKind::ProcessNumber, VALID_PROCESS_NUMBER)
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::NotFound));
    }

    #[tokio::test]
    async fn upstream_500_keeps_status_and_body() {
        let server = server_answering(CPF_PATH, 500, "{\"message\":\"boom\"}").await;
        let dispatcher = memory_dispatcher(&server.base_url(), "t");

        match dispatcher.query(QueryKind::Cpf, VALID_CPF).await {
            Err(QueryError::Upstream { status, body }) => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "{\"message\":\"boom\"}");
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn upstream_timeout_is_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(CPF_PATH);
                then.status(200)
                    .delay(Duration::from_millis(800))
                    .json_body(json!([]));
            })
            .await;

        let mut config = upstream_config(&server.base_url());
        config.query_timeout_ms = 100;
        let dispatcher = memory_dispatcher_with(config, MemoryTokenStore::with_token(valid_token("t")));

        let err = dispatcher.query(QueryKind::Cpf, VALID_CPF).await.unwrap_err();
        assert!(matches!(err, QueryError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_unavailable() {
        // bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let dispatcher = memory_dispatcher(&format!("http://{}", addr), "t");
        let err = dispatcher.query(QueryKind::Cpf, VALID_CPF).await.unwrap_err();
        assert!(matches!(err, QueryError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn auth_failure_is_an_upstream_auth_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(AUTH_PATH);
                then.status(500);
            })
            .await;
        let query_mock = server
            .mock_async(|when, then| {
                when.method(POST).path(CPF_PATH);
                then.status(200).json_body(json!([]));
            })
            .await;

        let dispatcher = memory_dispatcher_with(upstream_config(&server.base_url()), MemoryTokenStore::new());
        let err = dispatcher.query(QueryKind::Cpf, VALID_CPF).await.unwrap_err();

        assert!(matches!(err, QueryError::UpstreamAuth(_)));
        query_mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_any_upstream_call() {
        let server = MockServer::start_async().await;
        let any_call = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({"accessToken": "x"}));
            })
            .await;

        // empty slot: a validation bypass would hit the auth endpoint
        let dispatcher = memory_dispatcher_with(upstream_config(&server.base_url()), MemoryTokenStore::new());

        let cases = [
            (QueryKind::Cpf, "", ValidationError::MissingInput),
            (QueryKind::Cpf, "111.111.111-11", ValidationError::InvalidCpf),
            (QueryKind::Cnpj, "00.000.000/0000-00", ValidationError::InvalidCnpj),
            (QueryKind::ProcessNumber, "12345", ValidationError::InvalidProcessNumber),
        ];
        for (kind, value, expected) in cases {
            match dispatcher.query(kind, value).await {
                Err(QueryError::Validation(e)) => assert_eq!(e, expected),
                other => panic!("expected validation error for {:?}, got {:?}", value, other),
            }
        }

        any_call.assert_hits_async(0).await;
    }
}
