//! Property-based tests for transitive dirty tracking.
//!
//! Random mutation scripts are applied to a content type; the assertions
//! check that dirtiness propagates upward, that reset clears every level,
//! and that the default template is always derived from the allowed list.

mod common;

use common::{article, template};
use proptest::prelude::*;
use strata_model::{ContentType, PropertyType, TracksChanges};
use strata_types::DataTypeId;

#[derive(Debug, Clone)]
enum Mutation {
    Entity(u8),
    Group { group: usize, op: u8 },
    Type { index: usize, op: u8 },
}

fn mutation_strategy() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        (0u8..4).prop_map(Mutation::Entity),
        (0usize..2, 0u8..2).prop_map(|(group, op)| Mutation::Group { group, op }),
        (0usize..3, 0u8..4).prop_map(|(index, op)| Mutation::Type { index, op }),
    ]
}

fn apply(ct: &mut ContentType, mutation: &Mutation) {
    match *mutation {
        Mutation::Entity(op) => match op {
            0 => ct.set_icon("icon-x"),
            1 => ct.set_allowed_templates(vec![template(1, "a")]),
            2 => ct.set_sort_order(4),
            _ => ct.set_allowed_as_root(true),
        },
        Mutation::Group { group, op } => {
            let g = &mut ct.property_groups_mut()[group];
            match op {
                0 => g.set_sort_order(2),
                _ => g.set_name(format!("Renamed{group}")),
            }
        }
        Mutation::Type { index, op } => {
            let alias = ct
                .property_types()
                .nth(index)
                .map(|pt| pt.alias().to_string())
                .unwrap_or_default();
            let Some(pt) = ct.property_type_mut(&alias) else {
                return;
            };
            match op {
                0 => pt.set_mandatory(true),
                1 => pt.set_sort_order(8),
                2 => pt.set_help_text(Some("help".into())),
                _ => pt.set_data_type_id(DataTypeId::new(-51)),
            }
        }
    }
}

fn type_op_strategy() -> impl Strategy<Value = u8> {
    0u8..4
}

proptest! {
    #[test]
    fn property_type_dirty_iff_mutated(ops in prop::collection::vec(type_op_strategy(), 0..8)) {
        let mut pt = PropertyType::new("title", "Title", DataTypeId::new(-88));
        for op in &ops {
            match op {
                0 => pt.set_mandatory(true),
                1 => pt.set_sort_order(1),
                2 => pt.set_name("T"),
                _ => pt.set_description(None),
            }
        }
        prop_assert_eq!(pt.is_dirty(), !ops.is_empty());
        pt.reset_dirty_properties();
        prop_assert!(!pt.is_dirty());
    }

    #[test]
    fn any_mutation_makes_the_entity_dirty(
        mutations in prop::collection::vec(mutation_strategy(), 1..12),
    ) {
        let mut ct = article();
        for m in &mutations {
            apply(&mut ct, m);
        }
        prop_assert!(ct.is_dirty());

        let expected = ct.dirty_fields().count() > 0
            || ct.property_groups().iter().any(|g| g.is_dirty())
            || ct.property_types().any(|pt| pt.is_dirty());
        prop_assert_eq!(ct.is_dirty(), expected);
    }

    #[test]
    fn reset_cleans_every_level_and_is_idempotent(
        mutations in prop::collection::vec(mutation_strategy(), 0..12),
    ) {
        let mut ct = article();
        for m in &mutations {
            apply(&mut ct, m);
        }
        ct.reset_dirty_properties();
        prop_assert!(!ct.is_dirty());
        prop_assert!(ct.property_groups().iter().all(|g| !g.is_dirty()));
        prop_assert!(ct.property_types().all(|pt| !pt.is_dirty()));

        ct.reset_dirty_properties();
        prop_assert!(!ct.is_dirty());
    }

    #[test]
    fn default_template_is_first_matching_allowed(
        ids in prop::collection::vec(0i32..10, 0..8),
        wanted in 0i32..12,
    ) {
        let mut ct = article();
        let templates: Vec<_> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| template(*id, &format!("t{i}")))
            .collect();
        ct.set_allowed_templates(templates.clone());
        // Assigning an allowed template never changes the list.
        if let Some(t) = templates.iter().find(|t| t.id.get() == wanted) {
            ct.assign_default_template(t.clone());
        }

        let expected = templates.iter().find(|t| t.id.get() == wanted);
        if expected.is_some() {
            prop_assert_eq!(ct.default_template(), expected);
        } else {
            prop_assert!(ct.default_template().is_none());
        }
        prop_assert_eq!(ct.allowed_templates(), templates.as_slice());
    }
}
