//! Tests for run orchestration, using fake services

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::locale::find_country;
    use crate::model::{AdCopyResult, KeywordIdea};
    use crate::pipeline::{KeywordFailurePolicy, Pipeline};
    use crate::tests::support::{
        run_params, search_result, shuffled_ideas, FakeCopyGeneration, FakeKeywordResearch, FakeSnippetSearch,
        mock_provider, KeywordCall, RecordingReporter, Reported, SnippetCall,
    };

    fn volumes(keywords: &[KeywordIdea]) -> Vec<u64> {
        keywords.iter().map(|k| k.avg_monthly_searches).collect()
    }

    #[tokio::test]
    async fn test_run_ranks_top_ten_and_reports_in_order() {
        let keywords = FakeKeywordResearch {
            ideas: shuffled_ideas(),
            ..Default::default()
        };
        let snippets = FakeSnippetSearch {
            results: (0..12).map(search_result).collect(),
            ..Default::default()
        };
        let copywriter = FakeCopyGeneration::default();

        let pipeline = Pipeline::new(keywords.clone(), snippets.clone(), copywriter.clone());
        let reporter = RecordingReporter::default();

        let output = pipeline.run(&run_params(), &reporter).await.unwrap();

        assert_eq!(
            keywords.calls.lock().unwrap().clone(),
            vec![KeywordCall {
                account_id: "7186856567".to_string(),
                geo_ids: vec![2528],
                language_id: 1000,
                seed_keywords: vec!["vakantiehuis".to_string()],
            }]
        );

        assert_eq!(
            volumes(&output.top_keywords),
            vec![1150, 1050, 950, 850, 750, 650, 550, 450, 350, 250]
        );
        assert!(output.top_keywords.iter().all(|k| k.text != "idea-0" && k.text != "idea-5"));

        assert_eq!(output.snippets.len(), 10);
        assert_eq!(output.ad_copy.text, "1. Jouw vakantiehuis wacht");

        let events = reporter.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], Reported::TopKeywords(output.top_keywords.clone()));
        assert_eq!(events[1], Reported::Snippets(output.snippets.clone()));
        assert_eq!(events[2], Reported::AdCopy(output.ad_copy.clone()));
    }

    #[tokio::test]
    async fn test_generation_request_built_from_run() {
        let snippets = FakeSnippetSearch {
            results: vec![search_result(1)],
            ..Default::default()
        };
        let copywriter = FakeCopyGeneration::default();
        let keywords = FakeKeywordResearch {
            ideas: shuffled_ideas(),
            ..Default::default()
        };

        let mut params = run_params();
        params.seed_keywords = vec!["vakantiehuis".to_string(), "ardennen".to_string()];
        params.country = find_country("Belgium").unwrap();
        params.headline_count = 5;
        params.description_count = 2;

        let pipeline = Pipeline::new(keywords, snippets.clone(), copywriter.clone());
        pipeline.run(&params, &RecordingReporter::default()).await.unwrap();

        assert_eq!(
            snippets.calls.lock().unwrap().clone(),
            vec![SnippetCall {
                query: "vakantiehuis,ardennen".to_string(),
                language_hint: "en".to_string(),
                country_hint: "BE".to_string(),
                limit: 10,
            }]
        );

        let requests = copywriter.requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 1);

        let request = &requests[0];
        assert_eq!(request.top_keywords.len(), 10);
        assert_eq!(request.top_keywords[0], "idea-7");
        assert_eq!(request.brand, "Belvilla");
        assert_eq!(request.snippets, vec![search_result(1)]);
        assert_eq!((request.headline_count, request.description_count), (5, 2));
        assert_eq!(request.locale.language_code, "en");
        assert_eq!(request.locale.country_code, "BE");
    }

    #[tokio::test]
    async fn test_rejected_keywords_continue_with_empty_list() {
        let keywords = FakeKeywordResearch {
            rejection: Some("PERMISSION_DENIED".to_string()),
            ..Default::default()
        };
        let snippets = FakeSnippetSearch {
            results: vec![search_result(1)],
            ..Default::default()
        };
        let copywriter = FakeCopyGeneration::default();

        let pipeline = Pipeline::new(keywords, snippets.clone(), copywriter.clone());
        let reporter = RecordingReporter::default();

        let output = pipeline.run_and_report(&run_params(), &reporter).await.unwrap();

        assert!(output.top_keywords.is_empty());
        assert_eq!(snippets.calls.lock().unwrap().len(), 1);
        assert!(copywriter.requests.lock().unwrap()[0].top_keywords.is_empty());

        let events = reporter.events();
        assert_eq!(events[0], Reported::Error("Error with request: PERMISSION_DENIED".to_string()));
        assert_eq!(events[1], Reported::TopKeywords(Vec::new()));
        assert_eq!(events.len(), 4);
    }

    #[tokio::test]
    async fn test_abort_policy_stops_before_snippets() {
        let keywords = FakeKeywordResearch {
            rejection: Some("PERMISSION_DENIED".to_string()),
            ..Default::default()
        };
        let snippets = FakeSnippetSearch::default();
        let copywriter = FakeCopyGeneration::default();

        let pipeline =
            Pipeline::new(keywords, snippets.clone(), copywriter.clone()).with_policy(KeywordFailurePolicy::Abort);
        let reporter = RecordingReporter::default();

        assert!(pipeline.run_and_report(&run_params(), &reporter).await.is_none());
        assert!(snippets.calls.lock().unwrap().is_empty());
        assert!(copywriter.requests.lock().unwrap().is_empty());

        let errors = reporter.errors();
        assert_eq!(errors.len(), 2);
        assert!(errors[1].starts_with("An error occurred: "));
        assert!(errors[1].contains("run aborted"));
    }

    #[tokio::test]
    async fn test_abort_policy_allows_genuinely_empty_results() {
        let pipeline = Pipeline::new(
            FakeKeywordResearch::default(),
            FakeSnippetSearch::default(),
            FakeCopyGeneration::default(),
        )
        .with_policy(KeywordFailurePolicy::Abort);

        let output = pipeline.run(&run_params(), &RecordingReporter::default()).await.unwrap();
        assert!(output.top_keywords.is_empty());
        assert!(output.snippets.is_empty());
    }

    #[tokio::test]
    async fn test_snippet_failure_keeps_reported_keywords() {
        let keywords = FakeKeywordResearch {
            ideas: shuffled_ideas(),
            ..Default::default()
        };
        let snippets = FakeSnippetSearch {
            fail_with: Some("connection reset".to_string()),
            ..Default::default()
        };
        let copywriter = FakeCopyGeneration::default();

        let pipeline = Pipeline::new(keywords, snippets, copywriter.clone());
        let reporter = RecordingReporter::default();

        assert!(pipeline.run_and_report(&run_params(), &reporter).await.is_none());
        assert!(copywriter.requests.lock().unwrap().is_empty());

        let events = reporter.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Reported::TopKeywords(ref k) if k.len() == 10));
        assert_eq!(
            events[1],
            Reported::Error("An error occurred: Network error: connection reset".to_string())
        );
    }

    #[tokio::test]
    async fn test_output_carries_generated_copy() {
        let copywriter = FakeCopyGeneration {
            text: "Error generating ads.".to_string(),
            ..Default::default()
        };
        let pipeline = Pipeline::new(FakeKeywordResearch::default(), FakeSnippetSearch::default(), copywriter);

        let output = pipeline.run(&run_params(), &RecordingReporter::default()).await.unwrap();
        assert_eq!(
            output.ad_copy,
            AdCopyResult {
                text: "Error generating ads.".to_string()
            }
        );
        assert_eq!(pipeline.policy(), KeywordFailurePolicy::Continue);
    }

    #[tokio::test]
    async fn test_search_error_document_still_generates_copy() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "ya29.mock",
                "expires_in": 3599
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v21/customers/7186856567:generateKeywordIdeas"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    { "text": "vakantiehuis zee", "keywordIdeaMetrics": { "avgMonthlySearches": "880", "competition": "HIGH" } },
                    { "text": "vakantiehuis", "keywordIdeaMetrics": { "avgMonthlySearches": "9900", "competition": "MEDIUM" } }
                ]
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("q", "vakantiehuis"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": "Your account has run out of searches."
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/openai/deployments/gpt-data/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    { "index": 0, "message": { "role": "assistant", "content": "Headlines:\n1. Vakantiehuis aan zee" } }
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let pipeline = Pipeline::from_provider(mock_provider(&mock_server));
        let reporter = RecordingReporter::default();

        let output = pipeline.run_and_report(&run_params(), &reporter).await.unwrap();

        assert!(output.snippets.is_empty());
        assert_eq!(output.ad_copy.text, "Headlines:\n1. Vakantiehuis aan zee");
        assert!(reporter.errors().is_empty());

        let events = reporter.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1], Reported::Snippets(vec![]));
        assert!(matches!(events[2], Reported::AdCopy(_)));
    }
}
