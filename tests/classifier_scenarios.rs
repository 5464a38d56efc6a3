use lexmatch::alphabet::Alphabet;
use lexmatch::classifier::{
    Classifier, LanguageClassifier, NaiveBayesClassifier, NaiveBayesConfig, Prediction, Prior,
};
use lexmatch::distance::{DivergenceMetric, bhattacharyya, kullback_leibler};
use lexmatch::error::Result;
use lexmatch::matcher::{
    CombineMode, CompositeMatcher, Decision, LengthMatcher, MarkovMatcher, MarkovMatcherConfig,
    Matcher,
};
use lexmatch::ngram::NgramModel;

const MAORI: [&str; 12] = [
    "kia", "ora", "whanau", "marae", "aroha", "kai", "manaaki", "tamariki", "wairua", "whenua",
    "maunga", "awa",
];

const ENGLISH: [&str; 12] = [
    "the", "there", "other", "street", "strength", "which", "with", "this", "thought", "brother",
    "stretch", "things",
];

fn naive_bayes(degree: usize) -> Result<NaiveBayesClassifier> {
    let config = NaiveBayesConfig {
        degree,
        ..Default::default()
    };
    NaiveBayesClassifier::train(config, [("maori", MAORI), ("english", ENGLISH)])
}

#[test]
fn naive_bayes_separates_disjoint_vocabularies() -> Result<()> {
    let classifier = naive_bayes(2)?;

    assert_eq!(classifier.classify("whakapapa").label(), Some("maori"));
    assert_eq!(classifier.classify("strother").label(), Some("english"));

    let accuracy = classifier.test([
        ("wharekai", "maori"),
        ("maramataka", "maori"),
        ("theirs", "english"),
        ("strict", "english"),
    ])?;
    assert_eq!(accuracy, 1.0);
    Ok(())
}

#[test]
fn naive_bayes_scores_are_posteriors() -> Result<()> {
    let classifier = naive_bayes(1)?;
    let scores = classifier.classify_all("kaitiaki").expect("unigrams are known");
    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0].0, "maori");
    let total: f64 = scores.iter().map(|(_, score)| score).sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert!(scores[0].1 > scores[1].1);
    Ok(())
}

#[test]
fn naive_bayes_short_input_is_no_decision() -> Result<()> {
    let classifier = naive_bayes(3)?;
    assert_eq!(classifier.classify("ka"), Prediction::NoDecision);
    assert_eq!(
        Classifier::classify(&classifier, "ka")?,
        Prediction::NoDecision
    );
    Ok(())
}

#[test]
fn naive_bayes_proportional_prior_from_json_config() -> Result<()> {
    let config: NaiveBayesConfig =
        serde_json::from_str(r#"{"degree": 1, "prior": "proportional"}"#).expect("valid config");
    assert_eq!(config.prior, Prior::Proportional);
    assert!(!config.case_sensitive);

    let classifier = NaiveBayesClassifier::train(config, [("maori", MAORI), ("english", ENGLISH)])?;
    assert_eq!(classifier.labels(), vec!["maori", "english"]);
    Ok(())
}

#[test]
fn markov_matcher_config_from_json() -> Result<()> {
    let config: MarkovMatcherConfig =
        serde_json::from_str(r#"{"threshold": 0.3, "length_stdevs": 2.0}"#).expect("valid config");
    assert_eq!(config.threshold, 0.3);
    assert!(config.inclusive);
    assert_eq!(config.length_stdevs, Some(2.0));

    let bad: MarkovMatcherConfig =
        serde_json::from_str(r#"{"threshold": 3.0}"#).expect("valid json");
    assert!(MarkovMatcher::new(bad, MAORI).is_err());
    Ok(())
}

#[test]
fn language_classifier_ranks_markov_matchers() -> Result<()> {
    let maori = MarkovMatcher::new(MarkovMatcherConfig::default(), MAORI)?;
    let english = MarkovMatcher::new(MarkovMatcherConfig::default(), ENGLISH)?;

    let classifier = LanguageClassifier::new()
        .with_matcher("maori", Box::new(maori))?
        .with_matcher("english", Box::new(english))?;

    let (label, _) = classifier.classify_word("aroha")?.expect("categories exist");
    assert_eq!(label, "maori");

    let prediction = Classifier::classify(&classifier, "kia ora whanau")?;
    assert_eq!(prediction.label(), Some("maori"));

    let prediction = Classifier::classify(&classifier, "the other brother")?;
    assert_eq!(prediction.label(), Some("english"));
    assert_eq!(classifier.name(), "language");
    Ok(())
}

#[test]
fn composite_of_markov_and_length() -> Result<()> {
    let config = MarkovMatcherConfig {
        threshold: 0.25,
        ..Default::default()
    };
    let markov = MarkovMatcher::new(config, MAORI)?;
    let length = LengthMatcher::from_corpus(MAORI, 2.0)?;

    let matchers: Vec<Box<dyn Matcher>> = vec![Box::new(markov), Box::new(length)];
    let composite = CompositeMatcher::new(matchers, CombineMode::And)?;
    assert!(composite.is_match("aroha")?);
    assert!(!composite.is_match("strength")?);
    assert_eq!(
        composite.match_all(&["marae", "xyzzy"])?,
        vec![true, false]
    );
    Ok(())
}

#[test]
fn markov_overrides_force_decisions() -> Result<()> {
    let matcher = MarkovMatcher::new(MarkovMatcherConfig::default(), MAORI)?
        .with_word_override(["the"], Decision::Match)?
        .with_substring_override(["xx"], Decision::NoMatch)?;

    assert!(matcher.is_match("the")?);
    assert!(!matcher.is_match("maraexx")?);
    assert_eq!(matcher.decide("marae"), Decision::Undecided);
    Ok(())
}

#[test]
fn smoothed_language_models_have_finite_divergence() -> Result<()> {
    let alphabet = Alphabet::alpha();
    let model = NgramModel::new(1)?.normalize(true).smoothing(alphabet.clone())?;
    let maori = model.corpus_frequency(MAORI)?;
    let english = model.corpus_frequency(ENGLISH)?;

    let divergence = kullback_leibler(&maori, &english, &alphabet)?;
    assert!(divergence.is_finite() && divergence > 0.0);

    let same = DivergenceMetric::KullbackLeiblerDistance.compute(&maori, &maori, &alphabet)?;
    assert_eq!(same, 0.0);

    assert!(bhattacharyya(&maori, &english, &alphabet)? > 0.0);
    assert_eq!(bhattacharyya(&english, &english, &alphabet)?, 0.0);

    // Without smoothing, letters unseen in English make the divergence undefined.
    let raw = NgramModel::new(1)?.normalize(true);
    let err = kullback_leibler(
        &raw.corpus_frequency(MAORI)?,
        &raw.corpus_frequency(ENGLISH)?,
        &alphabet,
    )
    .unwrap_err();
    assert!(err.is_domain());
    Ok(())
}

#[test]
fn capitals_and_punctuation_cannot_slip_past_the_alphabet() -> Result<()> {
    let alphabet = Alphabet::alpha();
    let smoothed = NgramModel::new(1)?.normalize(true).smoothing(alphabet.clone())?;
    assert!(smoothed.frequency("John!!!!").unwrap_err().is_invalid_argument());
    let q = smoothed.frequency("john")?;

    // An unsmoothed count of the same text still carries the stray symbols.
    let p = NgramModel::new(1)?.normalize(true).frequency("John!!!!")?;
    assert!(p.get("J") > 0.0);
    assert!(kullback_leibler(&p, &q, &alphabet).unwrap_err().is_domain());
    assert!(kullback_leibler(&q, &p, &alphabet).unwrap_err().is_domain());
    assert!(bhattacharyya(&p, &p, &alphabet).unwrap_err().is_domain());

    let lowered = smoothed.frequency(&"John".to_lowercase())?;
    assert!(kullback_leibler(&lowered, &q, &alphabet)?.abs() < 1e-12);
    Ok(())
}
