mod common;

use common::{body, client, with_identity, StubTransport, BASE_URL, IDENTITY_URL};
use linkedin_mcp::{api::{HttpResponse, MediaKind, ProfileLookup, ReactionKind, TransportError, UploadPhase, Visibility},
                   error::{ApiError, Operation, UploadStep}};
use reqwest::Method;
use serde_json::json;

#[tokio::test]
async fn test_identity_resolved_once() {
    let transport = StubTransport::new(with_identity(|_| HttpResponse::json(201, &json!({"id": "urn:li:share:1"}))));
    let client = client(transport.clone());

    assert_eq!(client.resolve_identity().await.unwrap(), "urn:li:person:abc123");
    assert_eq!(client.resolve_identity().await.unwrap(), "urn:li:person:abc123");
    client.create_post("hi", Visibility::Public, &[]).await.unwrap();

    assert_eq!(transport.requests_to("/userinfo").len(), 1);
    assert_eq!(client.session().cached_identity(), Some("urn:li:person:abc123"));
}

#[tokio::test]
async fn test_identity_falls_back_to_me() {
    let transport = StubTransport::new(|request| {
        if request.url == IDENTITY_URL {
            Ok(HttpResponse::new(500, "boom"))
        } else {
            Ok(HttpResponse::json(200, &json!({"id": "999"})))
        }
    });
    let client = client(transport.clone());

    assert_eq!(client.resolve_identity().await.unwrap(), "urn:li:person:999");
    let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec![IDENTITY_URL.to_string(), format!("{}/me", BASE_URL)]);
}

#[tokio::test]
async fn test_identity_unresolved_when_both_fail() {
    let transport = StubTransport::new(|request| {
        if request.url == IDENTITY_URL {
            Err(TransportError::new("connection refused"))
        } else {
            Ok(HttpResponse::new(401, r#"{"message":"Invalid access token"}"#))
        }
    });
    let client = client(transport.clone());

    let err = client.resolve_identity().await.unwrap_err();
    assert!(matches!(err, ApiError::IdentityUnresolved(_)));
    assert!(err.to_string().contains("w_member_social"));
    assert_eq!(client.session().cached_identity(), None);

    // Failures are not cached
    client.resolve_identity().await.unwrap_err();
    assert_eq!(transport.requests().len(), 4);
}

#[tokio::test]
async fn test_post_not_sent_without_identity() {
    let transport = StubTransport::new(|_| Ok(HttpResponse::new(403, "")));
    let client = client(transport.clone());

    let err = client.create_post("hi", Visibility::Public, &[]).await.unwrap_err();
    assert!(matches!(err, ApiError::IdentityUnresolved(_)));
    assert!(transport.requests_to("/posts").is_empty());
}

#[tokio::test]
async fn test_create_post_returns_urn() {
    let transport = StubTransport::new(with_identity(|_| HttpResponse::json(201, &json!({"id": "urn:li:share:42"}))));
    let client = client(transport.clone());

    let receipt = client.create_post("Hello", Visibility::Connections, &[]).await.unwrap();
    assert_eq!(receipt.post_urn.as_deref(), Some("urn:li:share:42"));

    let request = &transport.requests_to("/posts")[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(
        body(request),
        json!({
            "author": "urn:li:person:abc123",
            "commentary": "Hello",
            "visibility": "CONNECTIONS",
            "distribution": {
                "feedDistribution": "MAIN_FEED",
                "targetEntities": [],
                "thirdPartyDistributionChannels": []
            },
            "lifecycleState": "PUBLISHED",
            "isReshareDisabledByAuthor": false
        })
    );
}

#[tokio::test]
async fn test_create_post_urn_from_header() {
    let transport = StubTransport::new(with_identity(|_| {
        HttpResponse::new(201, "").with_header("x-restli-id", "urn:li:ugcPost:7")
    }));
    let client = client(transport);

    let receipt = client.create_post("Hello", Visibility::Public, &[]).await.unwrap();
    assert_eq!(receipt.post_urn.as_deref(), Some("urn:li:ugcPost:7"));
}

#[tokio::test]
async fn test_create_post_attaches_first_media_only() {
    let transport = StubTransport::new(with_identity(|_| HttpResponse::json(201, &json!({"id": "urn:li:share:1"}))));
    let client = client(transport.clone());

    let media = vec!["urn:li:image:A".to_string(), "urn:li:image:B".to_string()];
    client.create_post("Two pics", Visibility::Public, &media).await.unwrap();

    let sent = body(&transport.requests_to("/posts")[0]);
    assert_eq!(sent["content"], json!({"media": {"id": "urn:li:image:A"}}));
}

#[tokio::test]
async fn test_rejection_carries_provider_body() {
    let transport = StubTransport::new(with_identity(|_| {
        HttpResponse::json(422, &json!({"message": "commentary too long"}))
    }));
    let client = client(transport);

    let err = client.create_post("x", Visibility::Public, &[]).await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.operation(), Some(Operation::CreatePost));
    let message = err.to_string();
    assert!(message.starts_with("Failed to create post: HTTP 422"), "{}", message);
    assert!(message.contains("commentary too long"));
}

#[tokio::test]
async fn test_session_headers_sent() {
    let transport = StubTransport::new(with_identity(|_| HttpResponse::new(204, "")));
    let client = client(transport.clone());

    client.delete_post("urn:li:share:42").await.unwrap();

    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.url, format!("{}/posts/urn%3Ali%3Ashare%3A42", BASE_URL));
    assert_eq!(request.header("Authorization"), Some("Bearer test-token"));
    assert_eq!(request.header("LinkedIn-Version"), Some("202510"));
    assert_eq!(request.header("X-Restli-Protocol-Version"), Some("2.0.0"));
    assert_eq!(request.header("Content-Type"), Some("application/json"));
}

#[tokio::test]
async fn test_update_post_sends_set_patch() {
    let transport = StubTransport::new(|_| Ok(HttpResponse::new(204, "")));
    let client = client(transport.clone());

    client.update_post("urn:li:share:42", "Edited").await.unwrap();

    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(body(request), json!({"patch": {"$set": {"commentary": "Edited"}}}));
}

#[tokio::test]
async fn test_upload_image_steps() {
    let transport = StubTransport::new(with_identity(|request| {
        if request.url.ends_with("images?action=initializeUpload") {
            HttpResponse::json(
                200,
                &json!({"value": {"uploadUrl": "https://upload.test/put/1", "image": "urn:li:image:C1"}}),
            )
        } else if request.url == "https://cdn.test/cat.png" {
            HttpResponse::new(200, vec![1u8, 2, 3])
        } else {
            HttpResponse::new(201, "")
        }
    }));
    let client = client(transport.clone());

    let handle = client.upload_image("https://cdn.test/cat.png").await.unwrap();
    assert_eq!(handle.urn, "urn:li:image:C1");
    assert_eq!(handle.phase, UploadPhase::Transferred);

    let init = &transport.requests_to("images?action=initializeUpload")[0];
    assert_eq!(body(init), json!({"initializeUploadRequest": {"owner": "urn:li:person:abc123"}}));

    let download = &transport.requests_to("/cat.png")[0];
    assert_eq!(download.header("Authorization"), None);

    let put = &transport.requests_to("/put/1")[0];
    assert_eq!(put.method, Method::PUT);
    assert_eq!(put.header("Authorization"), Some("Bearer test-token"));
}

#[tokio::test]
async fn test_upload_image_names_failing_step() {
    let transport = StubTransport::new(with_identity(|request| {
        if request.url.ends_with("images?action=initializeUpload") {
            HttpResponse::json(
                200,
                &json!({"value": {"uploadUrl": "https://upload.test/put/1", "image": "urn:li:image:C1"}}),
            )
        } else {
            HttpResponse::new(404, "missing")
        }
    }));
    let client = client(transport.clone());

    let err = client.upload_image("https://cdn.test/gone.png").await.unwrap_err();
    assert!(matches!(err, ApiError::ImageUploadFailed { step: UploadStep::Download, .. }));
    assert!(err.to_string().starts_with("Failed to upload image at download step"), "{}", err);
    assert!(transport.requests_to("/put/1").is_empty());
}

#[tokio::test]
async fn test_video_initialize_and_finalize() {
    let transport = StubTransport::new(with_identity(|request| {
        if request.url.ends_with("videos?action=initializeUpload") {
            HttpResponse::json(
                200,
                &json!({"value": {
                    "video": "urn:li:video:V1",
                    "uploadToken": "tok",
                    "uploadInstructions": [
                        {"uploadUrl": "https://upload.test/1", "firstByte": 0, "lastByte": 4194303},
                        {"uploadUrl": "https://upload.test/2", "firstByte": 4194304, "lastByte": 5000000}
                    ]
                }}),
            )
        } else {
            HttpResponse::new(200, "")
        }
    }));
    let client = client(transport.clone());

    let upload = client.initialize_video_upload(5_000_001).await.unwrap();
    assert_eq!(upload.urn, "urn:li:video:V1");
    assert_eq!(upload.instructions.len(), 2);

    let init = body(&transport.requests_to("videos?action=initializeUpload")[0]);
    assert_eq!(init["initializeUploadRequest"]["fileSizeBytes"], json!(5_000_001));
    assert_eq!(init["initializeUploadRequest"]["uploadCaptions"], json!(false));

    let err = upload.finalize_request(vec!["etag-1".to_string()]).unwrap_err();
    assert!(matches!(err, ApiError::PartCountMismatch { expected: 2, actual: 1 }));

    let finalize = upload
        .finalize_request(vec!["etag-1".to_string(), "etag-2".to_string()])
        .unwrap();
    let handle = client.finalize_video_upload(&finalize).await.unwrap();
    assert_eq!(handle.kind, MediaKind::Video);
    assert_eq!(handle.urn, "urn:li:video:V1");
    assert_eq!(handle.phase, UploadPhase::Finalized);

    let sent = body(&transport.requests_to("videos?action=finalizeUpload")[0]);
    assert_eq!(
        sent,
        json!({"finalizeUploadRequest": {
            "video": "urn:li:video:V1",
            "uploadToken": "tok",
            "uploadedPartIds": ["etag-1", "etag-2"]
        }})
    );
}

#[tokio::test]
async fn test_finalize_rejects_empty_parts_locally() {
    let transport = StubTransport::new(|_| Ok(HttpResponse::new(200, "")));
    let client = client(transport.clone());

    let finalize = linkedin_mcp::api::FinalizeVideoUpload {
        video: "urn:li:video:V1".to_string(),
        upload_token: String::new(),
        uploaded_part_ids: Vec::new(),
    };
    let err = client.finalize_video_upload(&finalize).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest { .. }));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_media_read_failure_is_not_found() {
    let transport = StubTransport::new(|_| Ok(HttpResponse::new(404, "")));
    let client = client(transport.clone());

    let err = client.get_image("urn:li:image:X").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { status: 404, .. }));
    assert_eq!(transport.requests()[0].url, format!("{}/images/urn%3Ali%3Aimage%3AX", BASE_URL));
}

#[tokio::test]
async fn test_add_reaction_payload() {
    let transport = StubTransport::new(with_identity(|_| HttpResponse::new(201, "")));
    let client = client(transport.clone());

    let record = client.add_reaction("urn:li:share:42", ReactionKind::Praise).await.unwrap();
    assert_eq!(record.actor_urn, "urn:li:person:abc123");
    assert_eq!(record.kind, ReactionKind::Praise);

    let sent = body(&transport.requests_to("/reactions")[0]);
    assert_eq!(
        sent,
        json!({"actor": "urn:li:person:abc123", "object": "urn:li:share:42", "reactionType": "PRAISE"})
    );
}

#[tokio::test]
async fn test_list_reactions_query() {
    let transport = StubTransport::new(|_| Ok(HttpResponse::json(200, &json!({"elements": []}))));
    let client = client(transport.clone());

    let data = client.list_reactions("urn:li:share:42").await.unwrap();
    assert_eq!(data, json!({"elements": []}));

    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::GET);
    assert_eq!(
        request.query,
        vec![
            ("q".to_string(), "entity".to_string()),
            ("entity".to_string(), "urn:li:share:42".to_string())
        ]
    );
}

#[tokio::test]
async fn test_profile_forbidden_is_limited() {
    let transport = StubTransport::new(|request| {
        if request.url == IDENTITY_URL {
            Ok(HttpResponse::json(200, &json!({"sub": "abc123"})))
        } else {
            Ok(HttpResponse::new(403, ""))
        }
    });
    let client = client(transport);

    match client.get_profile().await {
        ProfileLookup::Limited { message, person_urn } => {
            assert!(message.contains("r_liteprofile"));
            assert_eq!(person_urn, None);
        }
        other => panic!("expected limited profile, got {:?}", other),
    }

    assert!(client.validate_credentials().await);
    match client.get_profile().await {
        ProfileLookup::Limited { person_urn, .. } => assert_eq!(person_urn.as_deref(), Some("urn:li:person:abc123")),
        other => panic!("expected limited profile, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transport_timeout_is_reported() {
    let transport = StubTransport::new(|_| {
        Err(TransportError {
            message: "operation timed out".to_string(),
            timed_out: true,
        })
    });
    let client = client(transport);

    let err = client.delete_post("urn:li:share:1").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { operation: Operation::DeletePost, .. }));
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_identity_resolution_hits_network_once() {
    let transport = StubTransport::new(with_identity(|_| HttpResponse::new(500, "")));
    let client = std::sync::Arc::new(client(transport.clone()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = std::sync::Arc::clone(&client);
            tokio::spawn(async move { client.resolve_identity().await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "urn:li:person:abc123");
    }
    assert_eq!(transport.requests_to("/userinfo").len(), 1);
    assert_eq!(client.session().cached_identity(), Some("urn:li:person:abc123"));
}

#[tokio::test]
async fn test_initialize_document_upload() {
    let transport = StubTransport::new(with_identity(|_| {
        HttpResponse::json(
            200,
            &json!({"value": {"uploadUrl": "https://upload.test/doc/1", "document": "urn:li:document:D1"}}),
        )
    }));
    let client = client(transport.clone());

    let handle = client.initialize_document_upload().await.unwrap();
    assert_eq!(handle.kind, MediaKind::Document);
    assert_eq!(handle.urn, "urn:li:document:D1");
    assert_eq!(handle.upload_url.as_deref(), Some("https://upload.test/doc/1"));
    assert_eq!(handle.phase, UploadPhase::Initialized);

    let requests = transport.requests_to("documents?action=initializeUpload");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].url, format!("{}/documents?action=initializeUpload", BASE_URL));
    assert_eq!(body(&requests[0]), json!({"initializeUploadRequest": {"owner": "urn:li:person:abc123"}}));
}

#[tokio::test]
async fn test_initialize_document_upload_rejects_missing_fields() {
    let transport = StubTransport::new(with_identity(|_| HttpResponse::json(200, &json!({"value": {}}))));
    let client = client(transport);

    let err = client.initialize_document_upload().await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse { operation: Operation::InitializeDocumentUpload, .. }));
}

#[tokio::test]
async fn test_get_video_and_document_paths() {
    let transport = StubTransport::new(|request| {
        Ok(HttpResponse::json(200, &json!({"url": request.url.clone(), "status": "AVAILABLE"})))
    });
    let client = client(transport.clone());

    let video = client.get_video("urn:li:video:V").await.unwrap();
    assert_eq!(video["status"], json!("AVAILABLE"));
    let document = client.get_document("urn:li:document:D").await.unwrap();
    assert_eq!(document["status"], json!("AVAILABLE"));

    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].url, format!("{}/videos/urn%3Ali%3Avideo%3AV", BASE_URL));
    assert_eq!(requests[1].method, Method::GET);
    assert_eq!(requests[1].url, format!("{}/documents/urn%3Ali%3Adocument%3AD", BASE_URL));
}

#[tokio::test]
async fn test_get_video_failure_is_not_found() {
    let transport = StubTransport::new(|_| Ok(HttpResponse::new(410, "")));
    let client = client(transport);

    let err = client.get_video("urn:li:video:gone").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { operation: Operation::GetVideo, status: 410, .. }));
}

#[tokio::test]
async fn test_remove_reaction_path() {
    let transport = StubTransport::new(|_| Ok(HttpResponse::new(204, "")));
    let client = client(transport.clone());

    client.remove_reaction("urn:li:reaction:(a,b)").await.unwrap();

    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.url, format!("{}/reactions/urn%3Ali%3Areaction%3A%28a%2Cb%29", BASE_URL));
    assert_eq!(request.header("Authorization"), Some("Bearer test-token"));
}

#[tokio::test]
async fn test_remove_reaction_rejected() {
    let transport = StubTransport::new(|_| Ok(HttpResponse::new(404, "")));
    let client = client(transport);

    let err = client.remove_reaction("urn:li:reaction:(a,b)").await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { operation: Operation::RemoveReaction, status: 404, .. }));
}
