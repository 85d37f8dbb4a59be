use chrono::Utc;

use bancos_merge::apis::create_parser;
use bancos_merge::domain::{Entity, Flag, Source};
use bancos_merge::pipeline::{CandidateSet, CanonicalRegistry, ReconciliationEngine};

const STR_FEED: &str = "ISPB,Nome_Reduzido,Número_Código,Participa_da_Compe,Acesso_Principal,Nome_Extenso,Início_da_Operação\n\
00000000,BCO DO BRASIL S.A.,001,Sim,RSFN,\"Banco do Brasil S.A.\",22/04/2002\n\
00038121,Selic,n/a,Não,RSFN,\"Banco Central do Brasil - Selic\",22/04/2002\n\
60746948,BCO BRADESCO S.A.,237,Sim,RSFN,\"Banco Bradesco S.A.\",22/04/2002\n";

const SILOC_FEED: &str = "Participantes do SILOC\n\
1 001 00000000 sim sim BANCO DO BRASIL S.A.\n\
2 237 60746948 Não sim BANCO BRADESCO S.A.\n";

fn parse(source: Source, text: &str) -> Vec<Entity> {
    create_parser(source).unwrap().parse(text).unwrap()
}

#[test]
fn test_feeds_build_a_registry_from_scratch() {
    let mut candidates = CandidateSet::new();
    candidates.insert(Source::Str, parse(Source::Str, STR_FEED));
    candidates.insert(Source::Siloc, parse(Source::Siloc, SILOC_FEED));

    let mut registry = CanonicalRegistry::new(Vec::new());
    let report = ReconciliationEngine::new().run(&mut registry, candidates, Utc::now());

    assert_eq!(report.pass(Source::Str).unwrap().added, 2);
    assert_eq!(report.pass(Source::Siloc).unwrap().updated, 2);

    let bradesco = registry.entities().iter().find(|e| e.ispb == 60746948).unwrap();
    assert_eq!(bradesco.clearing_code, 237);
    assert_eq!(bradesco.document, "60746948000112");
    assert_eq!(bradesco.charge, Flag::No);
    assert_eq!(bradesco.credit_document, Flag::Yes);
    assert_eq!(bradesco.date_operation_started, "2002-04-22");
}

#[test]
fn test_blank_payloads_yield_no_candidates() {
    for source in Source::MERGE_ORDER {
        let parser = create_parser(source).unwrap();
        assert!(parser.parse("").unwrap().is_empty(), "{} parsed candidates from nothing", source);
    }
}
