use moodnote_core::analysis::lexicon::Lexicons;
use moodnote_core::analysis::score_sentiment_with;
use moodnote_core::{analyze_content, score_sentiment, Analyzer, SentimentLabel, GENERAL_CATEGORY};

#[test]
fn score_and_confidence_stay_in_range() {
    let long = "long neutral sentence without much polarity ".repeat(500);
    let samples = [
        "",
        "   ",
        "good good good good good good good good",
        "bad terrible awful horrible sad angry frustrated disappointed",
        "Bugün harika bir gün, çok mutlu ve keyifliyim!",
        "Berbat bir hafta, her şey kötü ve zor geçti.",
        "🙂 🚀 ✨ émoji et accents",
        long.as_str(),
    ];

    for sample in samples {
        let sentiment = score_sentiment(sample);
        assert!(
            (-1.0..=1.0).contains(&sentiment.score),
            "score out of range for {sample:?}: {}",
            sentiment.score
        );
        assert!(
            (0.0..=1.0).contains(&sentiment.confidence),
            "confidence out of range for {sample:?}: {}",
            sentiment.confidence
        );
    }
}

#[test]
fn empty_text_scores_neutral_with_default_confidence() {
    let sentiment = score_sentiment("");
    assert_eq!(sentiment.score, 0.0);
    assert_eq!(sentiment.label, SentimentLabel::Neutral);
    assert_eq!(sentiment.confidence, 0.8);
}

#[test]
fn weak_raw_score_above_threshold_is_positive() {
    let mut lexicons = Lexicons::default();
    lexicons.polarity.insert("okayish".to_string(), 0.6);

    let sentiment = score_sentiment_with(&lexicons, "okayish");
    assert_eq!(sentiment.label, SentimentLabel::Positive);
    assert!((sentiment.score - 0.12).abs() < 1e-9);
}

#[test]
fn turkish_and_english_texts_get_expected_labels() {
    assert_eq!(
        score_sentiment("Bugün harika bir gün").label,
        SentimentLabel::Positive
    );
    assert_eq!(
        score_sentiment("Çok kötü bir sınav oldu").label,
        SentimentLabel::Negative
    );
    assert_eq!(
        score_sentiment("Meeting moved to tomorrow").label,
        SentimentLabel::Neutral
    );
}

#[test]
fn common_english_words_outside_override_lists_are_scored() {
    assert_eq!(
        analyze_content("Weekend", "The weekend was ruined by rain")
            .sentiment
            .label,
        SentimentLabel::Negative
    );
    assert_eq!(
        analyze_content("Thanks", "So grateful for the help today")
            .sentiment
            .label,
        SentimentLabel::Positive
    );
}

#[test]
fn analysis_is_deterministic() {
    let title = "Weekly planning";
    let content = "Project deadline moved. Meeting with the team on Monday! \
                   Need to update the budget spreadsheet and book a flight.";
    let first = analyze_content(title, content);
    let second = analyze_content(title, content);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn text_without_taxonomy_words_is_general() {
    let result = analyze_content("x", "x");
    assert_eq!(result.category, GENERAL_CATEGORY);
    assert!(result.keywords.is_empty());
    assert_eq!(result.summary, None);
    // Category matching is strict for single letters; sentiment overrides are not.
    assert_eq!(result.sentiment.label, SentimentLabel::Positive);
}

#[test]
fn category_reads_title_and_content() {
    let result = analyze_content("Recipe", "Dinner with pasta and a salad");
    assert_eq!(result.category, "food");

    let result = analyze_content("Sınav haftası", "Okul kütüphanesinde ödev ve kitap");
    assert_eq!(result.category, "education");
}

#[test]
fn keywords_are_capped_and_sorted_by_frequency() {
    let content = "alpha alpha alpha alpha alpha alpha \
                   beta beta beta beta beta \
                   gamma gamma gamma gamma \
                   delta delta delta \
                   epsilon epsilon \
                   zeta";
    let result = analyze_content("notes", content);
    assert_eq!(
        result.keywords,
        vec!["alpha", "beta", "gamma", "delta", "epsilon"]
    );
}

#[test]
fn keywords_include_title_tokens() {
    let result = analyze_content("Garden garden", "garden tomatoes");
    assert_eq!(result.keywords, vec!["garden", "tomatoes"]);
}

#[test]
fn summary_needs_one_hundred_characters_of_content() {
    let short = "s".repeat(99);
    assert_eq!(analyze_content("t", &short).summary, None);

    let exact = "s".repeat(100);
    assert_eq!(analyze_content("t", &exact).summary.as_deref(), Some(exact.as_str()));
}

#[test]
fn summary_ignores_the_title() {
    let content = format!("Body first sentence. {}", "more words here ".repeat(10));
    let result = analyze_content("A long title that should never be summarized", &content);
    assert_eq!(result.summary.as_deref(), Some("Body first sentence"));
}

#[test]
fn analyzer_with_custom_lexicons_only_uses_those_tables() {
    let lexicons = Lexicons::default();
    let analyzer = Analyzer::new(&lexicons);
    let result = analyzer.analyze("amazing", "flight hotel");
    assert_eq!(result.sentiment.label, SentimentLabel::Neutral);
    assert_eq!(result.category, GENERAL_CATEGORY);
    assert_eq!(result.keywords, vec!["amazing", "flight", "hotel"]);
}

#[test]
fn analysis_serializes_to_expected_wire_shape() {
    let result = analyze_content("x", "x");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["sentiment"]["label"], "positive");
    assert_eq!(json["category"], "general");
    assert!(json["keywords"].as_array().unwrap().is_empty());
    assert!(json.get("summary").is_none());
}
