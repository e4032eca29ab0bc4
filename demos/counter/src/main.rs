#![allow(non_snake_case)]

use std::cell::RefCell;
use std::rc::Rc;

use rejoin_core::*;
use rejoin_host::{TreeHost, dispatch};

fn Counter(_props: &Props) -> Element {
    let (count, set_count) = use_state(0i64);

    Element::host("column", Props::new(), vec![
        Element::host("text", Props::new().set("content", format!("Count = {count}")), vec![])
            .into(),
        Element::host(
            "button",
            Props::new().on("click", {
                let set_count = set_count.clone();
                move |_| set_count.update(|c| c + 1)
            }),
            vec!["Increment".into()],
        )
        .into(),
        Element::host(
            "button",
            Props::new().on("click", move |_| set_count.update(|c| c - 1)),
            vec!["Decrement".into()],
        )
        .into(),
    ])
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let host = Rc::new(RefCell::new(TreeHost::new()));
    let backend: Rc<RefCell<dyn HostBackend>> = host.clone();
    let container = host.borrow().container();
    let _runtime = render(Element::component(Counter, Props::new(), vec![]), backend, container);

    println!("mounted:\n{}", host.borrow().dump());

    let buttons = host.borrow().find_all("button");
    for _ in 0..3 {
        dispatch(&host, buttons[0], &Event::click())?;
    }
    dispatch(&host, buttons[1], &Event::click())?;

    println!("after three increments and one decrement:\n{}", host.borrow().dump());
    Ok(())
}
