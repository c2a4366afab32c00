//! Sheet to base ontology pipeline tests
//!
//! Reads the fixture sheet, generates the base ontology and checks the
//! graph and its serializations.

use oxigraph::io::RdfParser;
use oxigraph::model::vocab::{rdf, xsd};
use oxigraph::model::{Literal, NamedNode, Term};
use pretty_assertions::assert_eq;
use rimo_core::prelude::*;
use rimo_service::generator::{BaseOntologyGenerator, OntologyGenerator};
use rimo_service::graph::RdfSerializationFormat;
use rimo_service::loader::{FileSource, SheetReader};
use rimo_service::namespace::pato;
use rimo_service::validator::RecordValidator;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/kpis.csv");

fn rimo(local: &str) -> NamedNode {
    NamedNode::new(format!("https://w3id.org/RIMO/{local}")).unwrap()
}

async fn load_fixture() -> Vec<KpiRecord> {
    SheetReader::new()
        .load(&FileSource::new(FIXTURE))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_fixture_records() {
    let records = load_fixture().await;

    let rows: Vec<usize> = records.iter().map(|r| r.row).collect();
    assert_eq!(rows, vec![4, 5, 7, 8]);

    let names: Vec<&str> = records.iter().map(|r| r.indicator.as_str()).collect();
    assert_eq!(
        names,
        vec!["Number of users", "Downloads/Month", "Citations", "User satisfaction"]
    );
    assert_eq!(
        records[0].description.as_deref(),
        Some("Unique users per month")
    );
    assert_eq!(
        records[3].mandatory,
        MandatoryFlag::Other("optional".to_string())
    );
}

#[tokio::test]
async fn test_one_indicator_per_row() {
    let records = load_fixture().await;
    let graph = BaseOntologyGenerator::new(&RimoConfig::default())
        .unwrap()
        .generate(&records)
        .unwrap();

    assert_eq!(
        graph.subjects_of_type(rimo("Indicator").as_ref()),
        vec![
            rimo("Citations"),
            rimo("Downloads_Month"),
            rimo("Number_of_users"),
            rimo("User_satisfaction"),
        ]
    );
}

#[tokio::test]
async fn test_indicator_values() {
    let records = load_fixture().await;
    let graph = BaseOntologyGenerator::new(&RimoConfig::default())
        .unwrap()
        .generate(&records)
        .unwrap();

    let downloads = rimo("Downloads_Month");
    assert_eq!(
        graph.objects(&downloads, rimo("serviceCategory").as_ref()),
        vec![Term::from(rimo("Library")), Term::from(rimo("Web_API"))]
    );
    assert!(graph.contains(
        &downloads,
        rimo("mandatory").as_ref(),
        Literal::new_typed_literal("false", xsd::BOOLEAN)
    ));
    assert_eq!(
        graph.objects(&downloads, rimo("automationTool").as_ref()),
        vec![Term::from(rimo("Bioconductor")), Term::from(rimo("GitHub"))]
    );

    let satisfaction = rimo("User_satisfaction");
    assert!(graph.contains(&satisfaction, rimo("valueType").as_ref(), pato::QUALITATIVE.into_owned()));
    assert!(graph.contains(
        &satisfaction,
        rimo("serviceCategory").as_ref(),
        rimo("Helpdesk")
    ));
    assert!(graph.contains(
        &satisfaction,
        rimo("link").as_ref(),
        Literal::new_simple_literal("internal wiki")
    ));
    assert!(graph.contains(&rimo("Helpdesk"), rdf::TYPE, rimo("ServiceCategory")));
}

#[tokio::test]
async fn test_turtle_reparses_to_same_triples() {
    let records = load_fixture().await;
    let graph = BaseOntologyGenerator::new(&RimoConfig::default())
        .unwrap()
        .generate(&records)
        .unwrap();

    for format in [
        RdfSerializationFormat::Turtle,
        RdfSerializationFormat::NTriples,
        RdfSerializationFormat::RdfXml,
    ] {
        let bytes = graph.serialize(format).unwrap();
        let parsed = RdfParser::from_format(format.to_oxigraph_format())
            .for_reader(bytes.as_slice())
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(parsed.len(), graph.len(), "triple count differs for {format}");
    }
}

#[tokio::test]
async fn test_serialization_is_deterministic() {
    let records = load_fixture().await;
    let generator = BaseOntologyGenerator::new(&RimoConfig::default()).unwrap();
    let first = generator
        .generate(&records)
        .unwrap()
        .serialize_to_string(RdfSerializationFormat::Turtle)
        .unwrap();
    let second = generator
        .generate(&records)
        .unwrap()
        .serialize_to_string(RdfSerializationFormat::Turtle)
        .unwrap();
    assert_eq!(first, second);
    assert!(first.contains("@prefix rimo: <https://w3id.org/RIMO/>"));
}

#[tokio::test]
async fn test_fixture_lint() {
    let records = load_fixture().await;
    let report = RecordValidator::new(Vocabulary::default()).validate(&records);

    assert_eq!(report.records, 4);
    assert_eq!(report.error_count(), 0);
    assert_eq!(report.warning_count(), 2);
    assert!(report.messages.iter().all(|m| m.row == Some(8)));
    assert!(report.passes(false));
    assert!(!report.passes(true));
}
