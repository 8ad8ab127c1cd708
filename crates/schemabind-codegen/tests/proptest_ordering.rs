//! Property-based tests for model ordering and single emission
//!
//! Random forests are shuffled into arbitrary catalog order; every model must
//! still list parents first and every emitter pass must write each type once.

use proptest::prelude::*;
use schemabind_codegen::{EmissionMemo, ModelBuilder, emit_with_ancestors};
use schemabind_core::{Category, StaticCatalog, TypeDescriptor};
use std::collections::{HashMap, HashSet};

// Strategy: a forest where type i may extend any earlier type, in shuffled catalog order
fn arb_forest() -> impl Strategy<Value = Vec<TypeDescriptor>> {
    prop::collection::vec((any::<bool>(), any::<prop::sample::Index>()), 1..40)
        .prop_map(|links| {
            links
                .iter()
                .enumerate()
                .map(|(i, (root, parent))| {
                    let descriptor = TypeDescriptor::new(
                        format!("T{i}"),
                        format!("org.example.T{i}"),
                        Category::Message,
                    );
                    if i == 0 || *root {
                        descriptor
                    } else {
                        descriptor.with_parent(format!("T{}", parent.index(i)))
                    }
                })
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

fn parents(descriptors: &[TypeDescriptor]) -> HashMap<String, String> {
    descriptors
        .iter()
        .filter_map(|d| d.parent.clone().map(|p| (d.name.clone(), p)))
        .collect()
}

fn chain(name: &str, parents: &HashMap<String, String>) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = parents.get(name);
    while let Some(parent) = current {
        chain.push(parent.clone());
        current = parents.get(parent);
    }
    chain
}

proptest! {
    /// Property: a selected type never precedes a selected ancestor
    #[test]
    fn proptest_model_lists_parents_first(
        forest in arb_forest(),
        picks in prop::collection::vec(any::<bool>(), 40),
    ) {
        let parents = parents(&forest);
        let selected: Vec<String> = forest
            .iter()
            .zip(&picks)
            .filter(|(_, pick)| **pick)
            .map(|(d, _)| d.name.clone())
            .collect();
        let catalog = StaticCatalog::from_descriptors(forest);
        let mut builder = ModelBuilder::new(&catalog).unwrap();

        let model = builder.build_model(selected.clone()).unwrap();

        prop_assert_eq!(model.len(), selected.len());
        let position: HashMap<&str, usize> =
            model.names().into_iter().enumerate().map(|(i, n)| (n, i)).collect();
        for name in &selected {
            for ancestor in chain(name, &parents) {
                if let Some(&p) = position.get(ancestor.as_str()) {
                    prop_assert!(p < position[name.as_str()]);
                }
            }
        }
    }

    /// Property: one pass writes every selected type and ancestor exactly once, parents first
    #[test]
    fn proptest_emission_is_exactly_once(
        forest in arb_forest(),
        picks in prop::collection::vec(any::<bool>(), 40),
    ) {
        let parents = parents(&forest);
        let selected: Vec<String> = forest
            .iter()
            .zip(&picks)
            .filter(|(_, pick)| **pick)
            .map(|(d, _)| d.name.clone())
            .collect();
        let catalog = StaticCatalog::from_descriptors(forest);
        let mut builder = ModelBuilder::new(&catalog).unwrap();
        let model = builder.build_model(selected.clone()).unwrap();

        let mut memo = EmissionMemo::new();
        let mut out = String::new();
        for node in model.iter() {
            emit_with_ancestors(node, &mut memo, &mut out, |n, buf| {
                buf.push_str(n.name());
                buf.push('\n');
                Ok(())
            })
            .unwrap();
        }

        let written: Vec<&str> = out.lines().collect();
        let unique: HashSet<&str> = written.iter().copied().collect();
        prop_assert_eq!(unique.len(), written.len());
        prop_assert_eq!(written.as_slice(), memo.emitted());

        let position: HashMap<&str, usize> =
            written.iter().enumerate().map(|(i, n)| (*n, i)).collect();
        for name in &selected {
            let at = position[name.as_str()];
            for ancestor in chain(name, &parents) {
                prop_assert!(position[ancestor.as_str()] < at);
            }
        }
    }
}
