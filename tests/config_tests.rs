mod common;

use cardfit::{EventConfig, PaperSpec};
use common::png_assertions::read_png;
use common::{TestResult, test_generator};
use std::path::PathBuf;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn every_demo_configuration_loads_and_fits() -> TestResult {
    let generator = test_generator();
    for name in ["honey_sensory.json", "wedding.json", "birthday.json", "corporate.json"] {
        let config = EventConfig::load(demo(name))?;
        assert!(!config.participants.is_empty(), "{name}");
        let content = config.card_content()?;
        let (_, plan) = generator.plan(&content, &config.paper_size)?;
        generator.engine().preflight(&plan, &content)?;
    }
    Ok(())
}

#[test]
fn demo_papers_match_their_events() -> TestResult {
    let birthday = EventConfig::load(demo("birthday.json"))?;
    let corporate = EventConfig::load(demo("corporate.json"))?;
    assert_eq!(birthday.paper_size, PaperSpec::Named("A6".into()));
    assert_eq!(corporate.paper_size, PaperSpec::Named("LETTER".into()));
    Ok(())
}

#[test]
fn config_driven_batch_writes_every_card() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut config = EventConfig::load(demo("wedding.json"))?;
    config.output_folder = dir.path().join("wedding");

    let report = test_generator().generate_from_config(&config)?;
    assert_eq!(report.count(), 4);
    assert_eq!(report.paper.name(), "A5");
    let first = read_png(&report.cards[0].file_path)?;
    assert_eq!(first.width, 1748);
    assert!(
        report.cards[0]
            .file_path
            .ends_with("Mr._&_Mrs._Anderson_invitation_A5.png")
    );
    Ok(())
}

#[test]
fn missing_configuration_file_is_an_io_error() {
    let err = EventConfig::load(demo("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, cardfit::PipelineError::Io(_)));
    assert!(err.to_string().contains("does_not_exist.json"));
}

#[test]
fn integer_paper_sizes_parse_as_widths() -> TestResult {
    let config = EventConfig::from_json(r#"{ "paper_size": 1200, "event": { "title": "T" } }"#)?;
    assert_eq!(config.paper_size, PaperSpec::Width(1200));
    let err = EventConfig::from_json(r#"{ "paper_size": [1, 2], "event": { "title": "T" } }"#)
        .unwrap_err();
    assert!(err.to_string().contains("paper_size"), "{err}");
    Ok(())
}
