use notegraph_core::{seed, NoteSnapshot, SeedError, Viewport, VIEWPORT_MARGIN};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
use uuid::Uuid;

fn note(title: &str) -> NoteSnapshot {
    NoteSnapshot::new(Uuid::new_v4(), title, format!("{title} body"))
}

fn notes(count: usize) -> Vec<NoteSnapshot> {
    (0..count).map(|idx| note(&format!("note {idx}"))).collect()
}

#[test]
fn seeded_positions_stay_inside_margin_band() {
    let viewport = Viewport::new(800.0, 600.0);
    for count in [1usize, 5, 40] {
        for rng_seed in 0..5u64 {
            let mut rng = StdRng::seed_from_u64(rng_seed);
            let state = seed(&notes(count), viewport, &mut rng).expect("seed should succeed");
            assert_eq!(state.nodes.len(), count);
            for node in state.nodes.values() {
                assert!(node.x >= VIEWPORT_MARGIN && node.x <= viewport.width - VIEWPORT_MARGIN);
                assert!(node.y >= VIEWPORT_MARGIN && node.y <= viewport.height - VIEWPORT_MARGIN);
                assert_eq!(node.vx, 0.0);
                assert_eq!(node.vy, 0.0);
            }
        }
    }
}

#[test]
fn reseeding_is_idempotent_in_identity_not_in_value() {
    let viewport = Viewport::new(800.0, 600.0);
    let fixture = notes(8);

    let mut first_rng = StdRng::seed_from_u64(1);
    let mut second_rng = StdRng::seed_from_u64(2);
    let first = seed(&fixture, viewport, &mut first_rng).expect("first seed");
    let second = seed(&fixture, viewport, &mut second_rng).expect("second seed");

    let first_ids: BTreeSet<_> = first.nodes.keys().copied().collect();
    let second_ids: BTreeSet<_> = second.nodes.keys().copied().collect();
    assert_eq!(first_ids, second_ids);
}

#[test]
fn nil_and_duplicate_note_ids_are_skipped() {
    let viewport = Viewport::new(800.0, 600.0);
    let keeper = note("keeper");
    let mut duplicate = note("duplicate");
    duplicate.id = keeper.id;
    let nil = NoteSnapshot::new(Uuid::nil(), "nil id", "body");

    let mut rng = StdRng::seed_from_u64(3);
    let state = seed(
        &[keeper.clone(), duplicate, nil],
        viewport,
        &mut rng,
    )
    .expect("seed should degrade, not fail");

    assert_eq!(state.nodes.len(), 1);
    assert!(state.nodes.contains_key(&keeper.id));
    // Skipped notes must not leave edges behind either.
    for edge in state.edges.values() {
        assert!(state.nodes.contains_key(&edge.source));
        assert!(state.nodes.contains_key(&edge.target));
    }
}

#[test]
fn too_small_viewport_is_rejected() {
    let mut rng = StdRng::seed_from_u64(4);
    let result = seed(&notes(3), Viewport::new(90.0, 600.0), &mut rng);
    assert!(matches!(result, Err(SeedError::ViewportTooSmall { .. })));

    // Exactly twice the margin leaves no placement band.
    let result = seed(&notes(3), Viewport::new(800.0, 100.0), &mut rng);
    assert!(matches!(result, Err(SeedError::ViewportTooSmall { .. })));
}

#[test]
fn non_finite_viewport_is_rejected_not_fatal() {
    let mut rng = StdRng::seed_from_u64(6);
    for viewport in [
        Viewport::new(f64::NAN, 600.0),
        Viewport::new(800.0, f64::NAN),
        Viewport::new(f64::INFINITY, 600.0),
        Viewport::new(800.0, f64::NEG_INFINITY),
    ] {
        let result = seed(&notes(3), viewport, &mut rng);
        assert!(
            matches!(result, Err(SeedError::ViewportTooSmall { .. })),
            "viewport {viewport:?} must be rejected, not sampled"
        );
    }
}

#[test]
fn nodes_carry_label_and_sanitized_excerpt() {
    let viewport = Viewport::new(800.0, 600.0);
    let fixture = NoteSnapshot::new(
        Uuid::new_v4(),
        "Marcus Aurelius",
        "# Meditations\n![bust](img/bust.png)\nYou have power over your **mind**",
    );

    let mut rng = StdRng::seed_from_u64(5);
    let state = seed(&[fixture.clone()], viewport, &mut rng).expect("seed");
    let node = state.nodes.get(&fixture.id).expect("node for note");
    assert_eq!(node.label, "Marcus Aurelius");
    let excerpt = node.excerpt.as_deref().expect("excerpt from body");
    assert!(excerpt.contains("Meditations"));
    assert!(excerpt.contains("mind"));
    assert!(!excerpt.contains("img/bust.png"));
}
