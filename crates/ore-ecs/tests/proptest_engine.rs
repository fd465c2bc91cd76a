//! Property tests for engine operations.
//!
//! Random sequences of create/attach/detach/destroy operations are applied
//! to an engine and checked against a simple model after every step.

use std::collections::HashMap;

use ore_ecs::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone, Default, PartialEq)]
struct Pos {
    x: i32,
    y: i32,
}

impl Component for Pos {
    const NAME: &'static str = "pos";
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Tag(u32);

impl Component for Tag {
    const NAME: &'static str = "tag";
}

#[derive(Debug, Clone)]
enum EngineOp {
    Create,
    AttachPos(usize, i32, i32),
    AttachTag(usize, u32),
    DetachPos(usize),
    Destroy(usize),
    Duplicate(usize),
}

fn engine_op_strategy() -> impl Strategy<Value = EngineOp> {
    prop_oneof![
        Just(EngineOp::Create),
        (0..64usize, -1000..1000i32, -1000..1000i32).prop_map(|(i, x, y)| EngineOp::AttachPos(i, x, y)),
        (0..64usize, any::<u32>()).prop_map(|(i, t)| EngineOp::AttachTag(i, t)),
        (0..64usize).prop_map(EngineOp::DetachPos),
        (0..64usize).prop_map(EngineOp::Destroy),
        (0..64usize).prop_map(EngineOp::Duplicate),
    ]
}

#[derive(Debug, Default, Clone)]
struct Model {
    pos: Option<Pos>,
    tag: Option<Tag>,
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn random_ops_match_model(ops in prop::collection::vec(engine_op_strategy(), 1..60)) {
        let mut engine = Engine::new(PoolConfig::uniform(8));
        engine.register::<Pos>();
        engine.register::<Tag>();

        let mut alive: Vec<EntityId> = Vec::new();
        let mut model: HashMap<EntityId, Model> = HashMap::new();
        let mut dead: Vec<EntityId> = Vec::new();

        for op in ops {
            match op {
                EngineOp::Create => {
                    let e = engine.create_entity();
                    alive.push(e);
                    model.insert(e, Model::default());
                }
                EngineOp::AttachPos(i, x, y) if !alive.is_empty() => {
                    let e = alive[i % alive.len()];
                    let mut pos = engine.create_component::<Pos>().unwrap();
                    prop_assert_eq!(&pos, &Pos::default());
                    pos.x = x;
                    pos.y = y;
                    let had = model[&e].pos.is_some();
                    prop_assert_eq!(engine.attach(e, pos.clone()).unwrap(), had);
                    model.get_mut(&e).unwrap().pos = Some(pos);
                }
                EngineOp::AttachTag(i, t) if !alive.is_empty() => {
                    let e = alive[i % alive.len()];
                    engine.attach(e, Tag(t)).unwrap();
                    model.get_mut(&e).unwrap().tag = Some(Tag(t));
                }
                EngineOp::DetachPos(i) if !alive.is_empty() => {
                    let e = alive[i % alive.len()];
                    let had = model[&e].pos.is_some();
                    prop_assert_eq!(engine.detach::<Pos>(e).unwrap(), had);
                    model.get_mut(&e).unwrap().pos = None;
                }
                EngineOp::Destroy(i) if !alive.is_empty() => {
                    let e = alive.remove(i % alive.len());
                    engine.destroy_entity(e).unwrap();
                    model.remove(&e);
                    dead.push(e);
                }
                EngineOp::Duplicate(i) if !alive.is_empty() => {
                    let src = alive[i % alive.len()];
                    let copy = engine.duplicate_entity(src).unwrap();
                    let m = model[&src].clone();
                    alive.push(copy);
                    model.insert(copy, m);
                }
                _ => {}
            }

            prop_assert_eq!(engine.entity_count(), alive.len());
            let mut listed: Vec<EntityId> = engine.entities().collect();
            let mut expected_alive = alive.clone();
            listed.sort();
            expected_alive.sort();
            prop_assert_eq!(listed, expected_alive);
            for &e in &alive {
                prop_assert!(engine.is_alive(e));
                let m = &model[&e];
                prop_assert_eq!(engine.get::<Pos>(e), m.pos.as_ref());
                prop_assert_eq!(engine.get::<Tag>(e), m.tag.as_ref());
                let expected = m.pos.is_some() as usize + m.tag.is_some() as usize;
                prop_assert_eq!(engine.component_count(e), expected);
            }
            for &e in &dead {
                prop_assert!(!engine.is_alive(e));
                prop_assert_eq!(engine.component_count(e), 0);
            }
            let with_pos = model.values().filter(|m| m.pos.is_some()).count();
            prop_assert_eq!(engine.iter::<Pos>().count(), with_pos);
        }
    }

    #[test]
    fn stale_handles_never_resolve(rounds in 1..40usize) {
        let mut engine = Engine::new(PoolConfig::uniform(4));
        engine.register::<Tag>();
        let mut stale = Vec::new();
        for round in 0..rounds {
            let e = engine.create_entity();
            engine.attach(e, Tag(round as u32)).unwrap();
            engine.destroy_entity(e).unwrap();
            stale.push(e);
        }
        for e in stale {
            prop_assert!(!engine.is_alive(e));
            prop_assert!(engine.get::<Tag>(e).is_none());
            prop_assert!(engine.attach(e, Tag(0)).is_err());
        }
    }
}
