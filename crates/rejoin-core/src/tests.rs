#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::element::*;
    use crate::hooks::{HookCell, Pending, SetState, settle, use_state};
    use crate::host_api::{HostBackend, HostNodeId};
    use crate::runtime::{Runtime, render};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        CreateNode(&'static str, HostNodeId),
        CreateText(HostNodeId),
        Insert { parent: HostNodeId, child: HostNodeId, index: usize },
        Remove { parent: HostNodeId, child: HostNodeId },
        SetProp { node: HostNodeId, name: String, value: PropValue },
        ClearProp { node: HostNodeId, name: String },
        AddListener { node: HostNodeId, event: String },
        RemoveListener { node: HostNodeId, event: String },
    }

    #[derive(Default)]
    struct MockHost {
        next: u64,
        calls: Vec<Call>,
    }

    impl HostBackend for MockHost {
        fn create_node(&mut self, tag: &'static str) -> HostNodeId {
            self.next += 1;
            let id = HostNodeId(self.next);
            self.calls.push(Call::CreateNode(tag, id));
            id
        }
        fn create_text(&mut self) -> HostNodeId {
            self.next += 1;
            let id = HostNodeId(self.next);
            self.calls.push(Call::CreateText(id));
            id
        }
        fn insert_child(&mut self, parent: HostNodeId, child: HostNodeId, index: usize) {
            self.calls.push(Call::Insert { parent, child, index });
        }
        fn remove_child(&mut self, parent: HostNodeId, child: HostNodeId) {
            self.calls.push(Call::Remove { parent, child });
        }
        fn set_prop(&mut self, node: HostNodeId, name: &str, value: &PropValue) {
            self.calls.push(Call::SetProp { node, name: name.into(), value: value.clone() });
        }
        fn clear_prop(&mut self, node: HostNodeId, name: &str) {
            self.calls.push(Call::ClearProp { node, name: name.into() });
        }
        fn add_listener(&mut self, node: HostNodeId, event: &str, _listener: Listener) {
            self.calls.push(Call::AddListener { node, event: event.into() });
        }
        fn remove_listener(&mut self, node: HostNodeId, event: &str) {
            self.calls.push(Call::RemoveListener { node, event: event.into() });
        }
    }

    const CONTAINER: HostNodeId = HostNodeId(0);

    fn mount(entry: Element) -> (Rc<RefCell<MockHost>>, Runtime) {
        let host = Rc::new(RefCell::new(MockHost::default()));
        let dyn_host: Rc<RefCell<dyn HostBackend>> = host.clone();
        let runtime = render(entry, dyn_host, CONTAINER);
        (host, runtime)
    }

    fn drain(host: &Rc<RefCell<MockHost>>) -> Vec<Call> {
        std::mem::take(&mut host.borrow_mut().calls)
    }

    #[test]
    fn factory_flattens_and_normalizes_children() {
        let el = Element::host("div", Props::new(), vec![
            vec![Child::from("a"), Child::from(Element::text("b"))].into(),
            false.into(),
            Child::from(None::<Element>),
            7i64.into(),
        ]);

        let kids = &el.props.children;
        assert_eq!(kids.len(), 5);
        assert!(kids.iter().all(|c| c.kind == ElementKind::Text));
        assert_eq!(kids[0].props.get(TEXT_VALUE), Some(&PropValue::Text("a".into())));
        assert_eq!(kids[1].props.get(TEXT_VALUE), Some(&PropValue::Text("b".into())));
        assert_eq!(kids[2].props.get(TEXT_VALUE), Some(&PropValue::Bool(false)));
        assert_eq!(kids[3].props.get(TEXT_VALUE), Some(&PropValue::Null));
        assert_eq!(kids[4].props.get(TEXT_VALUE), Some(&PropValue::Int(7)));
    }

    fn widget_a(_props: &Props) -> Element {
        Element::none()
    }
    fn widget_b(_props: &Props) -> Element {
        Element::none()
    }

    #[test]
    fn kind_identity_is_tag_or_function_address() {
        assert_eq!(ElementKind::Host("div"), ElementKind::Host("div"));
        assert_ne!(ElementKind::Host("div"), ElementKind::Host("span"));
        assert_eq!(ElementKind::Component(widget_a), ElementKind::Component(widget_a));
        assert_ne!(ElementKind::Component(widget_a), ElementKind::Component(widget_b));
        assert_ne!(ElementKind::Host("div"), ElementKind::Text);
    }

    #[test]
    fn settle_folds_queue_in_enqueue_order() {
        let cell = HookCell {
            state: Box::new(1i64),
            queue: vec![
                Box::new(Pending::Transform(Rc::new(|n: &i64| n + 1))),
                Box::new(Pending::Replace(10i64)),
                Box::new(Pending::Transform(Rc::new(|n: &i64| n * 2))),
            ],
        };
        assert_eq!(settle(&cell, 0, 0i64), 20);
    }

    #[test]
    fn settle_resets_on_type_change() {
        let cell = HookCell { state: Box::new("old".to_owned()), queue: Vec::new() };
        assert_eq!(settle(&cell, 0, 5i64), 5);
    }

    #[test]
    fn static_mount_then_noop_rerender_is_quiet() {
        let listener = Listener::new(|_| {});
        let entry = Element::host(
            "div",
            Props::new().set("title", "x").set("onclick", listener),
            vec!["hi".into()],
        );
        let (host, runtime) = mount(entry);

        let calls = drain(&host);
        let div = HostNodeId(1);
        let text = HostNodeId(2);
        assert_eq!(calls[0], Call::CreateNode("div", div));
        assert_eq!(calls[1], Call::CreateText(text));
        assert!(calls.contains(&Call::Insert { parent: CONTAINER, child: div, index: 0 }));
        assert!(calls.contains(&Call::AddListener { node: div, event: "click".into() }));
        assert!(calls.contains(&Call::SetProp {
            node: div,
            name: "title".into(),
            value: PropValue::Text("x".into()),
        }));
        assert!(calls.contains(&Call::Insert { parent: div, child: text, index: 0 }));
        assert!(calls.contains(&Call::SetProp {
            node: text,
            name: TEXT_VALUE.into(),
            value: PropValue::Text("hi".into()),
        }));

        // Unchanged entry, no queued updates: the pass must not touch the host.
        runtime.rerender();
        assert_eq!(drain(&host), Vec::new());
    }

    thread_local! {
        static COUNT_SETTER: RefCell<Option<SetState<i64>>> = const { RefCell::new(None) };
        static FLIP_SETTER: RefCell<Option<SetState<bool>>> = const { RefCell::new(None) };
    }

    fn count_setter() -> SetState<i64> {
        COUNT_SETTER.with(|s| s.borrow().clone()).unwrap()
    }

    fn label(_props: &Props) -> Element {
        let (n, set) = use_state(0i64);
        COUNT_SETTER.with(|s| *s.borrow_mut() = Some(set));
        Element::host("p", Props::new().set("class", "num"), vec![n.into()])
    }

    #[test]
    fn state_update_syncs_props_only() {
        let (host, _runtime) = mount(Element::component(label, Props::new(), vec![]));
        drain(&host);

        count_setter().update(|n| n + 1);
        let calls = drain(&host);
        assert_eq!(calls, vec![Call::SetProp {
            node: HostNodeId(2),
            name: TEXT_VALUE.into(),
            value: PropValue::Int(1),
        }]);
    }

    #[test]
    fn hook_state_survives_rerenders() {
        let (host, runtime) = mount(Element::component(label, Props::new(), vec![]));
        drain(&host);

        // Each pass publishes a fresh setter; three increments, one per pass.
        for _ in 0..3 {
            count_setter().update(|n| n + 1);
        }
        let calls = drain(&host);
        assert_eq!(calls.last(), Some(&Call::SetProp {
            node: HostNodeId(2),
            name: TEXT_VALUE.into(),
            value: PropValue::Int(3),
        }));

        // A pass with no queued updates keeps presenting the settled value.
        runtime.rerender();
        assert_eq!(drain(&host), Vec::new());
    }

    fn switcher(_props: &Props) -> Element {
        let (on, set) = use_state(false);
        FLIP_SETTER.with(|s| *s.borrow_mut() = Some(set));
        if on {
            Element::host("span", Props::new(), vec![])
        } else {
            Element::host("div", Props::new(), vec![])
        }
    }

    #[test]
    fn kind_change_removes_old_before_inserting_new() {
        let (host, _runtime) = mount(Element::component(switcher, Props::new(), vec![]));
        drain(&host);

        FLIP_SETTER.with(|s| s.borrow().clone()).unwrap().set(true);
        let calls = drain(&host);
        let removed = calls
            .iter()
            .position(|c| matches!(c, Call::Remove { .. }))
            .expect("old node removed");
        let inserted = calls
            .iter()
            .position(|c| matches!(c, Call::Insert { .. }))
            .expect("new node inserted");
        assert!(removed < inserted, "unmount must commit before insert: {calls:?}");
        assert_eq!(calls[inserted], Call::Insert {
            parent: CONTAINER,
            child: HostNodeId(2),
            index: 0,
        });
    }

    fn wrapped(_props: &Props) -> Element {
        Element::host("div", Props::new(), vec![
            Element::host("span", Props::new(), vec![]).into(),
        ])
    }

    fn unwrapper(_props: &Props) -> Element {
        let (on, set) = use_state(false);
        FLIP_SETTER.with(|s| *s.borrow_mut() = Some(set));
        if on {
            Element::host("p", Props::new(), vec![])
        } else {
            Element::component(wrapped, Props::new(), vec![])
        }
    }

    #[test]
    fn unmounting_a_component_detaches_its_owned_handles() {
        let (host, _runtime) = mount(Element::component(unwrapper, Props::new(), vec![]));
        drain(&host);

        FLIP_SETTER.with(|s| s.borrow().clone()).unwrap().set(true);
        let calls = drain(&host);
        // The component has no handle of its own; its div is what detaches.
        let removes: Vec<_> = calls.iter().filter(|c| matches!(c, Call::Remove { .. })).collect();
        assert_eq!(removes, vec![&Call::Remove { parent: CONTAINER, child: HostNodeId(1) }]);
    }

    #[test]
    fn suppressed_text_occupies_its_position() {
        let entry = Element::host("div", Props::new(), vec![
            "left".into(),
            false.into(),
            "right".into(),
        ]);
        let (host, _runtime) = mount(entry);

        let calls = drain(&host);
        let texts = calls.iter().filter(|c| matches!(c, Call::CreateText(_))).count();
        assert_eq!(texts, 2);
        // The suppressed slot still counts: "right" is committed at index 2.
        assert!(calls.contains(&Call::Insert {
            parent: HostNodeId(1),
            child: HostNodeId(3),
            index: 2,
        }));
    }

    #[test]
    #[should_panic(expected = "outside of a component render")]
    fn use_state_outside_render_faults() {
        let _ = use_state(0i64);
    }

    fn eager(_props: &Props) -> Element {
        let (n, set) = use_state(0i64);
        if n == 0 {
            // Setter during render: precondition violation.
            set.set(1);
        }
        Element::none()
    }

    #[test]
    #[should_panic(expected = "re-entrant render")]
    fn setter_during_render_faults() {
        let _ = mount(Element::component(eager, Props::new(), vec![]));
    }
}
