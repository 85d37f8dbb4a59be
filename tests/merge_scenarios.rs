use chrono::{DateTime, TimeZone, Utc};

use bancos_merge::common::document;
use bancos_merge::domain::{ChangeSet, Entity, Field, Flag, Source, Update};
use bancos_merge::pipeline::diff::{classify, finalize, RunDelta};
use bancos_merge::pipeline::processing::conflation::MatchPolicy;
use bancos_merge::pipeline::processing::merge::SourceHandler;
use bancos_merge::pipeline::{CandidateSet, CanonicalRegistry, ReconciliationEngine};

fn registered() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 5, 1, 12, 0, 0).unwrap()
}

fn bank(compe: u16, ispb: u32, long: &str, short: &str) -> Entity {
    Entity {
        clearing_code: compe,
        ispb,
        document: document::from_ispb(ispb),
        long_name: long.to_string(),
        short_name: short.to_string(),
        date_registered: Some(registered()),
        date_updated: Some(registered()),
        ..Entity::default()
    }
}

fn canonical() -> Vec<Entity> {
    vec![
        bank(1, 0, "Banco do Brasil S.A.", "BCO DO BRASIL S.A."),
        bank(237, 60746948, "Banco Bradesco S.A.", "BCO BRADESCO S.A."),
        bank(341, 60701190, "Itaú Unibanco S.A.", "ITAÚ UNIBANCO S.A."),
    ]
}

fn candidate(compe: u16, ispb: u32, long: &str) -> Entity {
    Entity {
        clearing_code: compe,
        ispb,
        long_name: long.to_string(),
        ..Entity::default()
    }
}

fn merge(canonical: Vec<Entity>, candidates: CandidateSet) -> (Vec<Entity>, RunDelta) {
    let now = Utc::now();
    let mut registry = CanonicalRegistry::new(canonical);
    let pristine = registry.snapshot();
    ReconciliationEngine::new().run(&mut registry, candidates, now);
    let merged = finalize(registry.into_entities(), now);
    let delta = classify(&merged, &pristine);
    (merged, delta)
}

fn feeds() -> CandidateSet {
    let mut str_entry = candidate(77, 416968, "Banco Inter S.A.");
    str_entry.short_name = "BCO INTER".to_string();

    let mut candidates = CandidateSet::new();
    candidates.insert(Source::Str, vec![str_entry]);
    candidates.insert(Source::Cql, vec![candidate(0, 60746948, "BANCO BRADESCO S.A.")]);
    candidates
}

#[test]
fn test_new_participant_is_added_with_derived_document() {
    let (merged, delta) = merge(canonical(), feeds());

    let inter = merged.iter().find(|e| e.ispb == 416968).unwrap();
    assert_eq!(inter.document, "00416968000101");
    assert_eq!(inter.short_name, "BCO INTER");

    let RunDelta::Changed(report) = delta else {
        panic!("expected changes");
    };
    assert_eq!(report.added.len(), 1);
    assert_eq!(report.updated.len(), 1);
    assert!(report.render().contains("**LegalCheque** (CQL):  **->** sim"));
}

#[test]
fn test_second_run_over_published_output_has_no_changes() {
    let (published, _) = merge(canonical(), feeds());
    let (_, delta) = merge(published, feeds());
    assert!(matches!(delta, RunDelta::NoChanges));
}

#[test]
fn test_output_is_ordered_by_clearing_code() {
    let (merged, _) = merge(canonical(), feeds());
    let codes: Vec<u16> = merged.iter().map(|e| e.clearing_code).collect();
    assert_eq!(codes, vec![1, 77, 237, 341]);
}

#[test]
fn test_existing_ispb_is_never_duplicated() {
    let mut candidates = CandidateSet::new();
    candidates.insert(Source::Str, vec![candidate(999, 60746948, "Bradesco Duplicado S.A.")]);

    let mut registry = CanonicalRegistry::new(canonical());
    let report = ReconciliationEngine::new().run(&mut registry, candidates, Utc::now());

    assert_eq!(registry.len(), 3);
    assert_eq!(report.pass(Source::Str).unwrap().not_found, 1);
}

#[test]
fn test_document_matched_feed_never_inserts() {
    let mut unknown = candidate(0, 0, "Cooperativa Desconhecida");
    unknown.document = "12345678000195".to_string();
    let mut candidates = CandidateSet::new();
    candidates.insert(Source::Slc, vec![unknown]);

    let mut registry = CanonicalRegistry::new(canonical());
    let report = ReconciliationEngine::new().run(&mut registry, candidates, Utc::now());

    assert_eq!(registry.len(), 3);
    assert_eq!(report.pass(Source::Slc).unwrap().not_found, 1);
}

#[test]
fn test_capability_flags_only_turn_on() {
    let mut flagged = canonical();
    flagged[1].detecta_flow = Flag::Yes;

    let mut candidates = CandidateSet::new();
    candidates.insert(Source::DetectaFlow, vec![candidate(0, 60701190, "ITAU")]);

    let mut registry = CanonicalRegistry::new(flagged);
    ReconciliationEngine::new().run(&mut registry, candidates, Utc::now());

    // Bradesco is absent from this run's feed and keeps its flag
    assert_eq!(registry.get(1).unwrap().detecta_flow, Flag::Yes);
    assert_eq!(registry.get(2).unwrap().detecta_flow, Flag::Yes);
    assert_eq!(registry.get(0).unwrap().detecta_flow, Flag::Unset);
}

#[test]
fn test_zero_root_only_matches_banco_do_brasil() {
    let mut brasil = candidate(0, 0, "Banco do Brasil");
    brasil.document = "00000000000272".to_string();
    let mut other = candidate(0, 0, "Banco Qualquer S.A.");
    other.document = "00000000000353".to_string();

    let mut candidates = CandidateSet::new();
    candidates.insert(Source::Slc, vec![brasil, other]);

    let mut registry = CanonicalRegistry::new(canonical());
    let report = ReconciliationEngine::new().run(&mut registry, candidates, Utc::now());

    let slc = report.pass(Source::Slc).unwrap();
    assert_eq!(slc.up_to_date, 1);
    assert_eq!(slc.not_found, 1);
}

#[test]
fn test_zero_root_flag_write_is_recorded_and_other_candidates_are_untouched() {
    let mut brasil = candidate(0, 0, "Banco do Brasil");
    brasil.document = "00000000000272".to_string();
    brasil.pcr = Flag::Yes;
    brasil.pcrp = Flag::No;
    let mut other = candidate(0, 0, "Banco Qualquer S.A.");
    other.document = "00000000000353".to_string();
    other.pcr = Flag::Yes;

    let mut candidates = CandidateSet::new();
    candidates.insert(Source::Pcr, vec![brasil, other]);

    let mut registry = CanonicalRegistry::new(canonical());
    let report = ReconciliationEngine::new().run(&mut registry, candidates, Utc::now());

    let pcr = report.pass(Source::Pcr).unwrap();
    assert_eq!(pcr.updated, 1);
    assert_eq!(pcr.not_found, 1);
    assert_eq!(pcr.added, 0);
    assert_eq!(registry.len(), 3);

    let bb = registry.entities().iter().find(|e| e.clearing_code == 1).unwrap();
    assert_eq!(bb.pcr, Flag::Yes);
    assert_eq!(bb.pcrp, Flag::No);
    let change = bb.changes().get(Field::Pcr).unwrap();
    assert_eq!(change.source, Source::Pcr);
    assert_eq!(change.old_value, "");
    assert_eq!(change.new_value, "sim");

    for untouched in registry.entities().iter().filter(|e| e.clearing_code != 1) {
        assert_eq!(untouched.pcr, Flag::Unset);
        assert_eq!(untouched.pcrp, Flag::Unset);
        assert!(untouched.changes().is_empty());
        assert_eq!(untouched.date_updated, Some(registered()));
    }
}

#[test]
fn test_flag_from_root_document_survives_a_published_round_trip() {
    let pcr_entry = Entity {
        document: document::normalize("00000000"),
        pcr: Flag::Yes,
        changes: ChangeSet::default(),
        ..Entity::default()
    };
    let feed = || {
        let mut candidates = CandidateSet::new();
        candidates.insert(Source::Pcr, vec![pcr_entry.clone()]);
        candidates
    };

    let mut registry = CanonicalRegistry::new(canonical());
    ReconciliationEngine::new().run(&mut registry, feed(), Utc::now());
    let bb = registry.entities().iter().find(|e| e.clearing_code == 1).unwrap();
    assert_eq!(bb.pcr, Flag::Yes);
    let change = bb.changes().get(Field::Pcr).unwrap();
    assert_eq!(change.source, Source::Pcr);
    assert_eq!(change.old_value, "");
    assert_eq!(change.new_value, "sim");

    let (merged, delta) = merge(canonical(), feed());
    assert!(matches!(delta, RunDelta::Changed(_)));
    let published: Vec<Entity> = serde_json::from_str(&serde_json::to_string(&merged).unwrap()).unwrap();
    let (_, delta) = merge(published, feed());
    assert!(matches!(delta, RunDelta::NoChanges));
}

#[test]
fn test_ambiguous_name_is_not_inserted() {
    let mut twins = canonical();
    twins.push(bank(600, 11111111, "Banco Gêmeo S.A.", "GEMEO UM"));
    twins.push(bank(601, 22222222, "Banco Gêmeo S.A.", "GEMEO DOIS"));

    let mut candidates = CandidateSet::new();
    candidates.insert(Source::Spi, vec![candidate(0, 33333333, "BANCO GEMEO S.A.")]);

    let mut registry = CanonicalRegistry::new(twins);
    let report = ReconciliationEngine::new().run(&mut registry, candidates, Utc::now());

    let spi = report.pass(Source::Spi).unwrap();
    assert_eq!(spi.inconclusive, 1);
    assert_eq!(spi.not_found, 1);
    assert!(!registry.contains_ispb(33333333));
}

struct ShortNameWriter {
    source: Source,
    value: &'static str,
}

impl SourceHandler for ShortNameWriter {
    fn source(&self) -> Source {
        self.source
    }

    fn policy(&self) -> MatchPolicy {
        MatchPolicy::ISPB_ONLY
    }

    fn updates(&self, current: &Entity, _candidate: &Entity) -> Vec<Update> {
        let update = Update::ShortName(self.value.to_string());
        if update.is_current(current) {
            Vec::new()
        } else {
            vec![update]
        }
    }
}

#[test]
fn test_last_writer_owns_provenance_and_first_value_is_kept() {
    let engine = ReconciliationEngine::with_handlers(vec![
        Box::new(ShortNameWriter {
            source: Source::Slc,
            value: "BRADESCO SLC",
        }),
        Box::new(ShortNameWriter {
            source: Source::Pcps,
            value: "BRADESCO PCPS",
        }),
    ]);

    let mut candidates = CandidateSet::new();
    candidates.insert(Source::Slc, vec![candidate(0, 60746948, "")]);
    candidates.insert(Source::Pcps, vec![candidate(0, 60746948, "")]);

    let mut registry = CanonicalRegistry::new(canonical());
    engine.run(&mut registry, candidates, Utc::now());

    let bradesco = registry.get(1).unwrap();
    assert_eq!(bradesco.short_name, "BRADESCO PCPS");
    let change = bradesco.changes().get(Field::ShortName).unwrap();
    assert_eq!(change.source, Source::Pcps);
    assert_eq!(change.old_value, "BCO BRADESCO S.A.");
    assert_eq!(change.new_value, "BRADESCO PCPS");
}

#[test]
fn test_missing_documents_are_generated_before_feeds() {
    let mut registry_entities = canonical();
    registry_entities[2].document = String::new();

    let mut registry = CanonicalRegistry::new(registry_entities);
    let report = ReconciliationEngine::new().run(&mut registry, CandidateSet::new(), Utc::now());

    assert_eq!(report.passes[0].source, Source::Document);
    assert_eq!(report.passes[0].updated, 1);
    assert_eq!(registry.get(2).unwrap().document, "60701190000104");
}
