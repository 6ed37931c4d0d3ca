use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::*;

/// Validation error for malformed or missing references in a `SceneDef`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: &'static str, id: String },
    MissingReference { kind: &'static str, id: String, context: String },
    InvalidValue { context: String },
    CyclicList { id: String, path: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id '{id}'")
            },
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
            ValidationError::CyclicList { id, path } => {
                write!(f, "form list '{id}' contains itself ({path})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate cross-references and basic invariants in a `SceneDef`.
///
/// Form lists are walked recursively by consumers with no depth limit, so a
/// list that contains itself (directly or through other lists) is reported
/// here.
///
/// ```
/// use loot_data::{FormDef, FormType, RefDef, RefKind, SceneDef, validate_scene};
///
/// let scene = SceneDef {
///     player: 0x14,
///     forms: vec![FormDef::new(0x7, "Player", FormType::Npc)],
///     refs: vec![RefDef::new(0x14, 0x7, RefKind::Actor { dead: false })],
/// };
/// assert!(validate_scene(&scene).is_empty());
/// ```
pub fn validate_scene(scene: &SceneDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut forms: HashMap<FormId, &FormDef> = HashMap::new();
    for form in &scene.forms {
        if form.id == 0 {
            errors.push(ValidationError::InvalidValue {
                context: format!("form '{}' has the null id", form.editor_id),
            });
        }
        if forms.insert(form.id, form).is_some() {
            errors.push(ValidationError::DuplicateId {
                kind: "form",
                id: hex(form.id),
            });
        }
    }

    let mut refs: HashMap<RefId, &RefDef> = HashMap::new();
    for reference in &scene.refs {
        if reference.handle == 0 {
            errors.push(ValidationError::InvalidValue {
                context: "reference has the null handle".to_string(),
            });
        }
        if refs.insert(reference.handle, reference).is_some() {
            errors.push(ValidationError::DuplicateId {
                kind: "reference",
                id: hex(reference.handle),
            });
        }
    }

    match refs.get(&scene.player) {
        Some(player) if player.is_actor() => {},
        Some(_) => errors.push(ValidationError::InvalidValue {
            context: format!("player reference '{}' is not an actor", hex(scene.player)),
        }),
        None => check_ref("reference", scene.player, &refs, "scene player".to_string(), &mut errors),
    }

    for form in &scene.forms {
        let context = format!("form '{}'", hex(form.id));
        for keyword in &form.keywords {
            check_typed(*keyword, FormType::Keyword, &forms, &context, &mut errors);
        }
        if let Some(enchantment) = form.as_enchantable().and_then(|data| data.enchantment) {
            check_typed(enchantment, FormType::Enchantment, &forms, &context, &mut errors);
        }
        if let Some(base) = form.as_enchantment().and_then(|data| data.base) {
            check_typed(base, FormType::Enchantment, &forms, &context, &mut errors);
        }
        if let Some(list) = form.as_list() {
            for child in &list.forms {
                check_ref("form", *child, &forms, context.clone(), &mut errors);
            }
        }
    }

    for reference in &scene.refs {
        let context = format!("reference '{}'", hex(reference.handle));
        check_ref("form", reference.base, &forms, context.clone(), &mut errors);
        if let Some(owner) = reference.owner {
            check_ref("form", owner, &forms, context.clone(), &mut errors);
        }
        if let Some(enchantment) = reference.enchantment {
            check_typed(enchantment, FormType::Enchantment, &forms, &context, &mut errors);
        }
        if reference.kind == RefKind::Item && reference.count <= 0 {
            errors.push(ValidationError::InvalidValue {
                context: format!("{context} has count {}", reference.count),
            });
        }
        for entry in &reference.inventory {
            let entry_context = format!("{context} inventory entry '{}'", hex(entry.form));
            check_ref("form", entry.form, &forms, entry_context.clone(), &mut errors);
            if entry.count <= 0 {
                errors.push(ValidationError::InvalidValue {
                    context: format!("{entry_context} has count {}", entry.count),
                });
            }
            if let Some(owner) = entry.owner {
                check_ref("form", owner, &forms, entry_context, &mut errors);
            }
        }
        for dropped in &reference.dropped {
            match refs.get(dropped) {
                Some(item) if item.kind == RefKind::Item => {},
                Some(_) => errors.push(ValidationError::InvalidValue {
                    context: format!("{context} drops non-item reference '{}'", hex(*dropped)),
                }),
                None => check_ref("reference", *dropped, &refs, context.clone(), &mut errors),
            }
        }
    }

    check_list_cycles(&forms, &mut errors);

    errors
}

fn hex(id: u32) -> String {
    format!("{id:08X}")
}

fn check_ref<T>(kind: &'static str, id: u32, set: &HashMap<u32, T>, context: String, errors: &mut Vec<ValidationError>) {
    if !set.contains_key(&id) {
        errors.push(ValidationError::MissingReference {
            kind,
            id: hex(id),
            context,
        });
    }
}

fn check_typed(
    id: FormId,
    expected: FormType,
    forms: &HashMap<FormId, &FormDef>,
    context: &str,
    errors: &mut Vec<ValidationError>,
) {
    match forms.get(&id) {
        Some(form) if form.form_type == expected => {},
        Some(form) => errors.push(ValidationError::InvalidValue {
            context: format!(
                "{context} expects {expected:?} '{}' but found {:?}",
                hex(id),
                form.form_type
            ),
        }),
        None => check_ref("form", id, forms, context.to_string(), errors),
    }
}

fn check_list_cycles(forms: &HashMap<FormId, &FormDef>, errors: &mut Vec<ValidationError>) {
    let mut finished = HashSet::new();
    let mut lists: Vec<_> = forms.values().filter(|form| form.as_list().is_some()).collect();
    lists.sort_by_key(|form| form.id);

    for list in lists {
        let mut path = Vec::new();
        if let Some(cycle_start) = find_cycle(list.id, forms, &mut path, &mut finished) {
            let trail = path
                .iter()
                .map(|id| hex(*id))
                .chain(std::iter::once(hex(cycle_start)))
                .collect::<Vec<_>>()
                .join(" -> ");
            errors.push(ValidationError::CyclicList {
                id: hex(cycle_start),
                path: trail,
            });
            // every list on the path is part of (or leads into) the reported cycle
            finished.extend(path);
        }
    }
}

/// Depth-first walk; returns the id that closes a cycle, leaving the walked path in `path`.
fn find_cycle(
    id: FormId,
    forms: &HashMap<FormId, &FormDef>,
    path: &mut Vec<FormId>,
    finished: &mut HashSet<FormId>,
) -> Option<FormId> {
    if path.contains(&id) {
        return Some(id);
    }
    if finished.contains(&id) {
        return None;
    }
    let children = forms.get(&id).and_then(|form| form.as_list()).map(|list| &list.forms);
    if let Some(children) = children {
        path.push(id);
        for child in children {
            if let Some(hit) = find_cycle(*child, forms, path, finished) {
                return Some(hit);
            }
        }
        path.pop();
    }
    finished.insert(id);
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_scene() -> SceneDef {
        SceneDef {
            player: 0x14,
            forms: vec![
                FormDef::new(0x7, "Player", FormType::Npc),
                FormDef::new(0x12EB7, "IronSword", FormType::Weapon),
            ],
            refs: vec![RefDef::new(0x14, 0x7, RefKind::Actor { dead: false })],
        }
    }

    fn list(id: FormId, children: &[FormId]) -> FormDef {
        FormDef::new(id, format!("List{id:X}"), FormType::FormList).with_detail(FormDetail::List(ListData {
            forms: children.to_vec(),
        }))
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let mut scene = base_scene();
        scene.forms.push(FormDef::new(0x12EB7, "IronSwordCopy", FormType::Weapon));

        let errors = validate_scene(&scene);
        assert!(errors.iter().any(
            |err| matches!(err, ValidationError::DuplicateId { kind, id } if *kind == "form" && id == "00012EB7")
        ));
    }

    #[test]
    fn missing_references_are_reported() {
        let mut scene = base_scene();
        let mut chest = RefDef::new(0x20, 0x999, RefKind::Container);
        chest.inventory.push(EntryDef::new(0x12EB7, 1));
        scene.refs.push(chest);

        let errors = validate_scene(&scene);
        assert!(errors.iter().any(
            |err| matches!(err, ValidationError::MissingReference { kind, id, .. } if *kind == "form" && id == "00000999")
        ));
    }

    #[test]
    fn zero_count_entries_are_reported() {
        let mut scene = base_scene();
        scene.forms.push(FormDef::new(0x30, "Chest", FormType::Container));
        let mut chest = RefDef::new(0x20, 0x30, RefKind::Container);
        chest.inventory.push(EntryDef::new(0x12EB7, 0));
        scene.refs.push(chest);

        let errors = validate_scene(&scene);
        assert!(errors.iter().any(|err| matches!(err, ValidationError::InvalidValue { .. })));
    }

    #[test]
    fn keyword_slots_must_hold_keywords() {
        let mut scene = base_scene();
        scene.forms[1].keywords.push(0x7);

        let errors = validate_scene(&scene);
        assert!(errors.iter().any(|err| matches!(err, ValidationError::InvalidValue { .. })));
    }

    #[test]
    fn nested_lists_without_cycles_pass() {
        let mut scene = base_scene();
        scene.forms.push(list(0x500, &[0x501, 0x12EB7]));
        scene.forms.push(list(0x501, &[0x12EB7]));

        assert!(validate_scene(&scene).is_empty());
    }

    #[test]
    fn self_referential_list_is_reported() {
        let mut scene = base_scene();
        scene.forms.push(list(0x500, &[0x500]));

        let errors = validate_scene(&scene);
        assert!(
            errors
                .iter()
                .any(|err| matches!(err, ValidationError::CyclicList { id, .. } if id == "00000500"))
        );
    }

    #[test]
    fn mutually_referential_lists_are_reported() {
        let mut scene = base_scene();
        scene.forms.push(list(0x500, &[0x501]));
        scene.forms.push(list(0x501, &[0x502]));
        scene.forms.push(list(0x502, &[0x500]));

        let errors = validate_scene(&scene);
        let cycles: Vec<_> = errors
            .iter()
            .filter(|err| matches!(err, ValidationError::CyclicList { .. }))
            .collect();
        assert_eq!(cycles.len(), 1);
        assert!(cycles[0].to_string().contains("00000500 -> 00000501 -> 00000502 -> 00000500"));
    }

    #[test]
    fn player_must_be_an_actor() {
        let mut scene = base_scene();
        scene.refs[0].kind = RefKind::Container;

        let errors = validate_scene(&scene);
        assert!(errors.iter().any(|err| matches!(err, ValidationError::InvalidValue { .. })));
    }
}
