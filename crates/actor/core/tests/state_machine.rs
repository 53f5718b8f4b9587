use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use actor_core::{
    ActorEvent, Actor, Context, ContextValue, State, StateMachine, Transition, TransitionError,
};

struct TestActor;

impl Actor for TestActor {
    fn position(&self) -> Vec3 {
        Vec3::ZERO
    }
    fn movement_input(&self) -> Vec3 {
        Vec3::ZERO
    }
    fn apply_velocity(&mut self, _velocity: Vec3) {}
}

type Log = Rc<RefCell<Vec<String>>>;

/// Records lifecycle calls and observed deltas/payloads into a shared log.
struct Recording {
    name: &'static str,
    log: Log,
}

impl Recording {
    fn factory(name: &'static str, log: &Log) -> impl Fn() -> Box<dyn State<TestActor>> + use<> {
        let log = Rc::clone(log);
        move || {
            Box::new(Recording {
                name,
                log: Rc::clone(&log),
            })
        }
    }
}

impl State<TestActor> for Recording {
    fn enter(
        &mut self,
        _actor: &mut TestActor,
        _ctx: &Context,
        payload: &Context,
    ) -> Option<Transition> {
        let speed = payload.float_or("speed", 0.0);
        self.log.borrow_mut().push(format!("enter:{}:{speed}", self.name));
        None
    }

    fn exit(&mut self, _actor: &mut TestActor, _ctx: &Context) {
        self.log.borrow_mut().push(format!("exit:{}", self.name));
    }

    fn update(&mut self, _actor: &mut TestActor, _ctx: &Context, delta: f32) {
        self.log.borrow_mut().push(format!("update:{}:{delta}", self.name));
    }

    fn handle_event(
        &mut self,
        _actor: &mut TestActor,
        _ctx: &Context,
        event: &str,
        data: &Context,
    ) -> Option<Transition> {
        self.log.borrow_mut().push(format!("event:{}:{event}", self.name));
        match event {
            "go" => Some(
                Transition::to(data.str_or("target", "")).with_payload(data.clone()),
            ),
            _ => None,
        }
    }
}

fn machine_with(log: &Log, names: &[&'static str]) -> StateMachine<TestActor> {
    let mut machine = StateMachine::new();
    for &name in names {
        machine.register(name, Recording::factory(name, log)).unwrap();
    }
    machine
}

#[test]
fn current_state_is_unset_before_first_transition() {
    let log: Log = Rc::default();
    let machine = machine_with(&log, &["idle", "move"]);
    assert_eq!(machine.current_state(), None);
}

#[test]
fn transition_enters_target_and_update_observes_delta() {
    let log: Log = Rc::default();
    let mut actor = TestActor;
    let mut machine = machine_with(&log, &["idle", "move"]);

    let payload = Context::new().with("speed", ContextValue::Float(5.0));
    machine.transition_to(&mut actor, "move", payload).unwrap();
    assert_eq!(machine.current_state(), Some("move"));

    machine.update(&mut actor, 0.1);
    assert_eq!(
        *log.borrow(),
        vec!["enter:move:5".to_string(), "update:move:0.1".to_string()]
    );
}

#[test]
fn successful_transition_emits_exactly_one_state_changed() {
    let log: Log = Rc::default();
    let mut actor = TestActor;
    let mut machine = machine_with(&log, &["idle", "move"]);

    machine.transition_to(&mut actor, "idle", Context::new()).unwrap();
    machine.transition_to(&mut actor, "move", Context::new()).unwrap();

    let events: Vec<ActorEvent> = machine.drain_events().into_iter().map(|r| r.event).collect();
    assert_eq!(
        events,
        vec![
            ActorEvent::StateChanged {
                previous: None,
                current: "idle".into()
            },
            ActorEvent::StateChanged {
                previous: Some("idle".into()),
                current: "move".into()
            },
        ]
    );
}

#[test]
fn unknown_target_fails_without_mutation() {
    let log: Log = Rc::default();
    let mut actor = TestActor;
    let mut machine = machine_with(&log, &["idle"]);
    machine.transition_to(&mut actor, "idle", Context::new()).unwrap();
    machine.drain_events();

    let result = machine.transition_to(&mut actor, "fly", Context::new());
    assert_eq!(
        result,
        Err(TransitionError::UnknownState { id: "fly".into() })
    );
    assert_eq!(machine.current_state(), Some("idle"));
    assert!(machine.drain_events().is_empty());
    // The active state was not exited.
    assert!(!log.borrow().iter().any(|line| line == "exit:idle"));
}

#[test]
fn re_entering_the_active_state_resets_it() {
    let log: Log = Rc::default();
    let mut actor = TestActor;
    let mut machine = machine_with(&log, &["idle"]);

    machine.transition_to(&mut actor, "idle", Context::new()).unwrap();
    machine.transition_to(&mut actor, "idle", Context::new()).unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "enter:idle:0".to_string(),
            "exit:idle".to_string(),
            "enter:idle:0".to_string(),
        ]
    );
    assert_eq!(machine.drain_events().len(), 2);
}

#[test]
fn duplicate_registration_keeps_the_original_factory() {
    let log: Log = Rc::default();
    let mut actor = TestActor;
    let mut machine = machine_with(&log, &["idle"]);

    let result = machine.register("idle", Recording::factory("impostor", &log));
    assert!(result.is_err());

    machine.transition_to(&mut actor, "idle", Context::new()).unwrap();
    assert_eq!(*log.borrow(), vec!["enter:idle:0".to_string()]);
}

#[test]
fn unregistering_the_active_state_exits_it_first() {
    let log: Log = Rc::default();
    let mut actor = TestActor;
    let mut machine = machine_with(&log, &["idle"]);

    machine.transition_to(&mut actor, "idle", Context::new()).unwrap();
    assert!(machine.unregister(&mut actor, "idle"));

    assert_eq!(machine.current_state(), None);
    assert!(log.borrow().iter().any(|line| line == "exit:idle"));
    assert!(!machine.is_registered("idle"));
}

#[test]
fn event_handler_can_request_a_transition() {
    let log: Log = Rc::default();
    let mut actor = TestActor;
    let mut machine = machine_with(&log, &["idle", "move"]);

    machine.transition_to(&mut actor, "idle", Context::new()).unwrap();
    let data = Context::new()
        .with("target", ContextValue::Str("move".into()))
        .with("speed", ContextValue::Float(2.0));
    machine.dispatch_event(&mut actor, "go", &data);

    assert_eq!(machine.current_state(), Some("move"));
    assert!(log.borrow().iter().any(|line| line == "enter:move:2"));
}

#[test]
fn dispatch_without_active_state_is_a_no_op() {
    let log: Log = Rc::default();
    let mut actor = TestActor;
    let mut machine = machine_with(&log, &["idle"]);

    machine.dispatch_event(&mut actor, "go", &Context::new());
    machine.update(&mut actor, 0.5);
    machine.physics_update(&mut actor, 0.5);

    assert!(log.borrow().is_empty());
    assert!(machine.drain_events().is_empty());
}

#[test]
fn context_is_replaced_wholesale_and_readable_from_states() {
    struct CtxReader {
        seen: Rc<RefCell<Vec<f32>>>,
    }

    impl State<TestActor> for CtxReader {
        fn update(&mut self, _actor: &mut TestActor, ctx: &Context, _delta: f32) {
            self.seen.borrow_mut().push(ctx.float_or("stamina", -1.0));
        }
    }

    let seen: Rc<RefCell<Vec<f32>>> = Rc::default();
    let mut actor = TestActor;
    let mut machine = StateMachine::new();
    let handle = Rc::clone(&seen);
    machine
        .register("read", move || {
            Box::new(CtxReader {
                seen: Rc::clone(&handle),
            })
        })
        .unwrap();

    machine.transition_to(&mut actor, "read", Context::new()).unwrap();
    machine.set_context(Context::new().with("stamina", ContextValue::Float(0.8)));
    machine.update(&mut actor, 0.1);
    // Replacement drops keys that are not in the new snapshot.
    machine.set_context(Context::new().with("hp", ContextValue::Int(10)));
    machine.update(&mut actor, 0.1);

    assert_eq!(*seen.borrow(), vec![0.8, -1.0]);
}

/// A state whose `enter` immediately requests the next state in a cycle.
struct Chaining {
    name: &'static str,
    next: &'static str,
    log: Log,
}

impl State<TestActor> for Chaining {
    fn enter(
        &mut self,
        _actor: &mut TestActor,
        _ctx: &Context,
        _payload: &Context,
    ) -> Option<Transition> {
        self.log.borrow_mut().push(format!("enter:{}", self.name));
        Some(Transition::to(self.next))
    }

    fn exit(&mut self, _actor: &mut TestActor, _ctx: &Context) {
        self.log.borrow_mut().push(format!("exit:{}", self.name));
    }
}

#[test]
fn transition_chain_is_bounded_and_keeps_last_entered_state() {
    let log: Log = Rc::default();
    let mut actor = TestActor;
    let mut machine = StateMachine::new();
    for (name, next) in [("a", "b"), ("b", "c"), ("c", "a")] {
        let handle = Rc::clone(&log);
        machine
            .register(name, move || {
                Box::new(Chaining {
                    name,
                    next,
                    log: Rc::clone(&handle),
                })
            })
            .unwrap();
    }

    // a → b → c run within the default depth limit of 3; the fourth hop
    // (back to a) is aborted and the caller still sees success because the
    // requested transition itself completed.
    machine.transition_to(&mut actor, "a", Context::new()).unwrap();

    assert_eq!(machine.current_state(), Some("c"));
    assert_eq!(
        *log.borrow(),
        vec![
            "enter:a".to_string(),
            "exit:a".to_string(),
            "enter:b".to_string(),
            "exit:b".to_string(),
            "enter:c".to_string(),
        ]
    );
    assert_eq!(machine.drain_events().len(), 3);
}
