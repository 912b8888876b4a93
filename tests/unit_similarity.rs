// Unit tests for information content and the similarity measures.
//
// Six proteins annotated against a 14-term ontology. With is_a edges only:
//   BPO root count 3; GO:0044237 and GO:0006915 have p = 1/3,
//   their MICA GO:0009987 has p = 2/3.
//   MFO root count 3; GO:0016787 has p = 2/3.
//   CCO root count 2; GO:0005737 and GO:0005622 have p = 1/2.

use megago::annotations::{AssociationParser, TermCounts};
use megago::input::TermSet;
use megago::ontology::{GoId, Namespace, OboParser, Relations};
use megago::pipeline::Resources;
use megago::similarity::{
    best_match_average, Lin, Measure, Resnik, SetComparer, SimRel, SimilarityMeasure,
};

const FIXTURE_OBO: &str = "\
format-version: 1.2

[Term]
id: GO:0008150
name: biological_process
namespace: biological_process

[Term]
id: GO:0009987
name: cellular process
namespace: biological_process
is_a: GO:0008150

[Term]
id: GO:0008152
name: metabolic process
namespace: biological_process
alt_id: GO:0044236
is_a: GO:0008150

[Term]
id: GO:0044237
name: cellular metabolic process
namespace: biological_process
is_a: GO:0008152
is_a: GO:0009987

[Term]
id: GO:0006915
name: apoptotic process
namespace: biological_process
is_a: GO:0009987

[Term]
id: GO:0003674
name: molecular_function
namespace: molecular_function

[Term]
id: GO:0003824
name: catalytic activity
namespace: molecular_function
is_a: GO:0003674

[Term]
id: GO:0016787
name: hydrolase activity
namespace: molecular_function
is_a: GO:0003824

[Term]
id: GO:0005575
name: cellular_component
namespace: cellular_component

[Term]
id: GO:0110165
name: cellular anatomical entity
namespace: cellular_component
is_a: GO:0005575

[Term]
id: GO:0005622
name: intracellular anatomical structure
namespace: cellular_component
is_a: GO:0110165

[Term]
id: GO:0005737
name: cytoplasm
namespace: cellular_component
is_a: GO:0110165
relationship: part_of GO:0005622

[Term]
id: GO:0000004
name: obsolete biological_process
namespace: biological_process
is_obsolete: true
replaced_by: GO:0008150
";

const FIXTURE_ASSOCIATIONS: &str = "\
P1\tGO:0044237
P2\tGO:0006915
P3\tGO:0008152;GO:0016787
P4\tGO:0016787
P5\tGO:0003824;GO:0005737
P6\tGO:0005622
";

const EPS: f64 = 1e-6;

fn go(number: u32) -> GoId {
    GoId::from_number(number)
}

fn resources(relations: Relations) -> Resources {
    let terms = OboParser::parse_str(FIXTURE_OBO).unwrap();
    let associations = AssociationParser::parse_str(FIXTURE_ASSOCIATIONS).unwrap();
    Resources::from_parts(terms, associations, relations)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

// ============================================================
// Term counts and information content
// ============================================================

#[test]
fn each_protein_counts_an_ancestor_once() {
    let r = resources(Relations::IsA);
    // P1 reaches GO:0008150 through both diamond paths but counts once.
    assert_eq!(r.counts.count(go(8150)), 3);
    assert_eq!(r.counts.count(go(9987)), 2);
    assert_eq!(r.counts.count(go(8152)), 2);
    assert_eq!(r.counts.root_count(Namespace::MolecularFunction), 3);
    assert_eq!(r.counts.root_count(Namespace::CellularComponent), 2);
}

#[test]
fn frequency_is_relative_to_the_namespace_root() {
    let r = resources(Relations::IsA);
    assert_close(r.counts.frequency(go(8150)), 1.0);
    assert_close(r.counts.frequency(go(44237)), 1.0 / 3.0);
    assert_close(r.counts.frequency(go(16787)), 2.0 / 3.0);
    assert_close(r.counts.frequency(go(5737)), 0.5);
}

#[test]
fn information_content_is_negative_log_frequency() {
    let r = resources(Relations::IsA);
    assert_close(r.counts.information_content(go(44237)), 3.0_f64.ln());
    assert_close(r.counts.information_content(go(9987)), 1.5_f64.ln());
    // Roots carry no information
    assert_eq!(r.counts.information_content(go(8150)), 0.0);
}

#[test]
fn unannotated_terms_have_zero_information_content() {
    let r = resources(Relations::IsA);
    assert_eq!(r.counts.frequency(go(4)), 0.0);
    assert_eq!(r.counts.information_content(go(9999999)), 0.0);
}

#[test]
fn part_of_edges_change_the_counts() {
    let is_a = resources(Relations::IsA);
    let part_of = resources(Relations::IsAPartOf);
    assert_eq!(is_a.counts.count(go(5622)), 1);
    // P5's cytoplasm annotation now also reaches GO:0005622
    assert_eq!(part_of.counts.count(go(5622)), 2);
    assert_eq!(part_of.counts.information_content(go(5622)), 0.0);
}

#[test]
fn term_counts_can_be_built_directly() {
    let r = resources(Relations::IsA);
    let associations = AssociationParser::parse_str(FIXTURE_ASSOCIATIONS).unwrap();
    let counts = TermCounts::new(&r.dag, &r.ancestors, &associations);
    assert_eq!(counts.len(), r.counts.len());
    assert_eq!(counts.unusable_proteins, 0);
}

// ============================================================
// MICA
// ============================================================

#[test]
fn mica_is_the_most_informative_shared_ancestor() {
    let r = resources(Relations::IsA);
    let ctx = r.context();
    assert_eq!(ctx.mica(go(44237), go(6915)), Some(go(9987)));
    assert_eq!(ctx.mica(go(44237), go(8152)), Some(go(8152)));
    assert_eq!(ctx.mica(go(44237), go(44237)), Some(go(44237)));
}

#[test]
fn mica_ties_go_to_the_smallest_id() {
    let r = resources(Relations::IsA);
    // GO:0005575 and GO:0110165 both have IC 0
    assert_eq!(r.context().mica(go(5737), go(5622)), Some(go(5575)));
}

#[test]
fn mica_is_undefined_across_namespaces() {
    let r = resources(Relations::IsA);
    assert_eq!(r.context().mica(go(44237), go(16787)), None);
}

// ============================================================
// Measures
// ============================================================

#[test]
fn simrel_of_siblings() {
    let r = resources(Relations::IsA);
    let ctx = r.context();
    let lin = 1.5_f64.ln() / 3.0_f64.ln();
    let score = SimRel.similarity(&ctx, go(44237), go(6915)).unwrap();
    assert_close(score, lin * (1.0 - 2.0 / 3.0));
    assert_close(score, 0.1230234);
}

#[test]
fn simrel_of_a_term_with_itself_is_one_minus_its_frequency() {
    let r = resources(Relations::IsA);
    let ctx = r.context();
    assert_close(SimRel.similarity(&ctx, go(44237), go(44237)).unwrap(), 2.0 / 3.0);
    assert_close(SimRel.similarity(&ctx, go(16787), go(16787)).unwrap(), 1.0 / 3.0);
}

#[test]
fn lin_and_resnik_of_siblings() {
    let r = resources(Relations::IsA);
    let ctx = r.context();
    assert_close(
        Lin.similarity(&ctx, go(44237), go(6915)).unwrap(),
        1.5_f64.ln() / 3.0_f64.ln(),
    );
    assert_close(
        Resnik.similarity(&ctx, go(44237), go(6915)).unwrap(),
        1.5_f64.ln(),
    );
    assert_close(Lin.similarity(&ctx, go(44237), go(44237)).unwrap(), 1.0);
}

#[test]
fn lin_is_zero_when_both_terms_carry_no_information() {
    let r = resources(Relations::IsA);
    let ctx = r.context();
    assert_eq!(Lin.similarity(&ctx, go(8150), go(8150)), Some(0.0));
    assert_eq!(SimRel.similarity(&ctx, go(5575), go(110165)), Some(0.0));
}

#[test]
fn measures_are_symmetric() {
    let r = resources(Relations::IsA);
    let ctx = r.context();
    for measure in [Measure::Rel, Measure::Lin, Measure::Resnik] {
        let m = measure.build();
        assert_eq!(
            m.similarity(&ctx, go(44237), go(6915)),
            m.similarity(&ctx, go(6915), go(44237)),
            "{measure} is not symmetric"
        );
    }
}

#[test]
fn cross_namespace_pairs_are_undefined() {
    let r = resources(Relations::IsA);
    let ctx = r.context();
    assert_eq!(SimRel.similarity(&ctx, go(44237), go(16787)), None);
    assert_eq!(Resnik.similarity(&ctx, go(5737), go(3824)), None);
}

#[test]
fn measure_names_parse() {
    assert_eq!("simrel".parse::<Measure>().unwrap(), Measure::Rel);
    assert_eq!("Lin".parse::<Measure>().unwrap(), Measure::Lin);
    assert_eq!("resnik".parse::<Measure>().unwrap(), Measure::Resnik);
    assert!("jaccard".parse::<Measure>().is_err());
    assert_eq!(Measure::default(), Measure::Rel);
    assert!(!Measure::Resnik.is_normalized());
}

// ============================================================
// Best-match average
// ============================================================

#[test]
fn bma_averages_both_directions() {
    let r = resources(Relations::IsA);
    let sibling = 1.5_f64.ln() / 3.0_f64.ln() / 3.0;
    let self_score = 2.0 / 3.0;

    let score = best_match_average(r.context(), &SimRel, &[go(44237)], &[go(6915), go(44237)])
        .unwrap();
    let expected = (self_score + (sibling + self_score) / 2.0) / 2.0;
    assert_close(score, expected);
    assert_close(score, 0.5307559);
}

#[test]
fn bma_of_empty_side_is_undefined() {
    let r = resources(Relations::IsA);
    assert_eq!(best_match_average(r.context(), &SimRel, &[], &[go(6915)]), None);
}

#[test]
fn set_comparison_reports_each_namespace() {
    let r = resources(Relations::IsA);
    let a = TermSet::from_ids([go(44237), go(16787), go(5737)], &r.dag);
    let b = TermSet::from_ids([go(6915), go(44237), go(16787)], &r.dag);

    let measure = SimRel;
    let mut comparer = SetComparer::new(r.context(), &measure);
    let result = comparer.compare(&a, &b);

    assert_close(result.biological_process.unwrap(), 0.5307559);
    assert_close(result.molecular_function.unwrap(), 1.0 / 3.0);
    assert_eq!(result.cellular_component, None);
}

#[test]
fn comparer_caches_term_pairs() {
    let r = resources(Relations::IsA);
    let measure = SimRel;
    let mut comparer = SetComparer::new(r.context(), &measure);

    let first = comparer.term_similarity(go(44237), go(6915));
    let second = comparer.term_similarity(go(6915), go(44237));
    assert_eq!(first, second);
    assert_eq!(comparer.cache_stats(), (1, 1));
}

#[test]
fn mean_pairwise_needs_two_terms() {
    let r = resources(Relations::IsA);
    let measure = SimRel;
    let mut comparer = SetComparer::new(r.context(), &measure);
    assert_eq!(comparer.mean_pairwise(&[go(44237)]), None);
    assert_close(
        comparer.mean_pairwise(&[go(44237), go(6915)]).unwrap(),
        0.1230234,
    );
}
