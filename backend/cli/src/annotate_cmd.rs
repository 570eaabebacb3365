//! `annotate` and `phrases`: run the extraction pipeline over one document.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chronoforge_classifier::{load_model, ClassifierKind, PeriodIntervalClassifier, RuleOnly};
use chronoforge_config::{ChronoForgeConfig, OutputFormat};
use chronoforge_core::render::{to_ann, to_scate_xml};
use chronoforge_core::{ChronoEntity, IdAllocator, TemporalPhrase};
use chronoforge_understanding::{
    build_document, mark_temporal, temporal_phrases, BuildOptions, LinkOptions,
};
use tokio::fs;
use tracing::info;

use crate::document::InputDocument;

/// The configured model, or the rule-only classifier when none is set.
pub async fn load_classifier(config: &ChronoForgeConfig) -> Result<Box<dyn PeriodIntervalClassifier>> {
    let Some(model_path) = config.model_path() else {
        info!("No model configured; using rule-only period/interval classifier");
        return Ok(Box::new(RuleOnly::new()));
    };
    let kind: ClassifierKind = config.classifier_kind().unwrap_or("NB").parse()?;
    let template = config.template_path().map(PathBuf::as_path);
    let classifier = load_model(kind, model_path, template)
        .await
        .with_context(|| format!("Failed to load {kind} model"))?;
    Ok(classifier)
}

pub fn build_options(config: &ChronoForgeConfig) -> BuildOptions {
    let defaults = BuildOptions::default();
    BuildOptions {
        window: config.window().unwrap_or(defaults.window),
        link: LinkOptions { drop_unanchored_nth: config.drop_unanchored_nth() },
    }
}

/// Mark tokens and cut the document into phrases.
pub fn segment(doc: &mut InputDocument) -> Result<Vec<TemporalPhrase>> {
    let doc_time = doc.doc_time()?;
    mark_temporal(&mut doc.tokens);
    Ok(temporal_phrases(&doc.text, &doc.tokens, doc_time))
}

pub fn render(entities: &[ChronoEntity], text: &str, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(entities)?,
        OutputFormat::Ann => to_ann(entities, text),
        OutputFormat::Scate => to_scate_xml(entities),
    })
}

pub async fn annotate(
    config: &ChronoForgeConfig,
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    start_id: u64,
) -> Result<()> {
    let mut doc = InputDocument::load(input).await?;
    let classifier = load_classifier(config).await?;
    let phrases = segment(&mut doc)?;
    info!(input = %input.display(), phrases = phrases.len(), "Annotating document");

    let mut ids = IdAllocator::starting_at(start_id);
    let entities = build_document(
        &phrases,
        &doc.tokens,
        classifier.as_ref(),
        &mut ids,
        &build_options(config),
    )?;
    let rendered = render(&entities, &doc.text, format)?;

    match output {
        Some(path) => {
            fs::write(path, rendered.as_bytes())
                .await
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            info!(path = %path.display(), entities = entities.len(), "Wrote annotations");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

pub async fn phrases(input: &Path) -> Result<()> {
    let mut doc = InputDocument::load(input).await?;
    for phrase in segment(&mut doc)? {
        println!("{}\t{}\t{}", phrase.span.start, phrase.span.end, phrase.text);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronoforge_config::apply_all_defaults;
    use chronoforge_config::schema::LinkerConfig;

    fn document() -> InputDocument {
        InputDocument::parse(
            r#"{
                "text": "Seen 5 p.m. EST on Monday.",
                "dct": "2020-06-15",
                "tokens": [
                    { "text": "Seen", "start": 0, "end": 4, "pos": "VBN" },
                    { "text": "5", "start": 5, "end": 6, "pos": "CD" },
                    { "text": "p.m.", "start": 7, "end": 11, "pos": "NN" },
                    { "text": "EST", "start": 12, "end": 15, "pos": "NNP" },
                    { "text": "on", "start": 16, "end": 18, "pos": "IN" },
                    { "text": "Monday", "start": 19, "end": 25, "pos": "NNP" },
                    { "text": ".", "start": 25, "end": 26, "pos": "." }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn segments_marked_tokens() {
        let mut doc = document();
        let phrases = segment(&mut doc).unwrap();
        assert!(doc.tokens[2].temporal);
        assert_eq!(phrases[0].text, "5 p.m. EST");
        assert_eq!(phrases[1].text, "Monday");
        assert!(phrases.iter().all(|p| p.doc_time.is_some()));
    }

    #[test]
    fn renders_all_formats() {
        let mut doc = document();
        let phrases = segment(&mut doc).unwrap();
        let mut ids = IdAllocator::new();
        let entities =
            build_document(&phrases, &doc.tokens, &RuleOnly::new(), &mut ids, &BuildOptions::default())
                .unwrap();
        assert!(!entities.is_empty());

        let json = render(&entities, &doc.text, OutputFormat::Json).unwrap();
        assert!(json.trim_start().starts_with('['));
        let ann = render(&entities, &doc.text, OutputFormat::Ann).unwrap();
        assert!(ann.contains("Hour-Of-Day 5 6\t5"));
        let xml = render(&entities, &doc.text, OutputFormat::Scate).unwrap();
        assert!(xml.contains("<type>Day-Of-Week</type>"));
    }

    #[test]
    fn options_follow_config() {
        let mut config = apply_all_defaults(ChronoForgeConfig::default());
        config.linker = Some(LinkerConfig { drop_unanchored_nth: Some(true) });
        let options = build_options(&config);
        assert_eq!(options.window, 5);
        assert!(options.link.drop_unanchored_nth);
    }

    #[tokio::test]
    async fn no_model_path_uses_rule_only() {
        let classifier = load_classifier(&ChronoForgeConfig::default()).await.unwrap();
        assert!(!classifier.template().is_empty());
    }
}
