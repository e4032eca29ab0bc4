#![allow(non_snake_case)]

use std::cell::RefCell;
use std::rc::Rc;

use rejoin_core::*;
use rejoin_host::{TreeHost, dispatch};

fn Button(props: &Props) -> Element {
    let mut attrs = Props::new();
    if let Some(on_click) = props.get("onclick") {
        attrs = attrs.set("onclick", on_click.clone());
    }
    Element::host(
        "button",
        attrs,
        props.children.iter().cloned().map(Child::Node).collect(),
    )
}

fn PanelTitle(props: &Props) -> Element {
    Element::host(
        "div",
        Props::new().set("style", "font-weight: bold;"),
        props.children.iter().cloned().map(Child::Node).collect(),
    )
}

fn PanelContent(props: &Props) -> Element {
    let mut children: Vec<Child> = vec!["PanelContent header: ".into()];
    children.extend(props.children.iter().cloned().map(Child::Node));
    Element::host("div", Props::new().set("style", "border: 1px solid gray;"), children)
}

fn Panel(props: &Props) -> Element {
    let (value, set_value) = use_state(String::from("edit this"));
    let title = props.get("title").cloned().unwrap_or(PropValue::Null);

    Element::host(
        "div",
        Props::new().set("style", "background: whitesmoke; padding: 10px;"),
        vec![
            Element::component(PanelTitle, Props::new(), vec![title.into()]).into(),
            Element::component(PanelContent, Props::new(), vec![
                Element::host(
                    "input",
                    Props::new()
                        .set("type", "text")
                        .set("value", value.clone())
                        .on("input", move |e| {
                            if let Some(v) = &e.value {
                                set_value.set(v.clone());
                            }
                        }),
                    vec![],
                )
                .into(),
                Element::host("div", Props::new(), vec![value.into()]).into(),
                Element::host(
                    "div",
                    Props::new().set("style", "padding: 10px; border: 1px solid darkcyan;"),
                    props.children.iter().cloned().map(Child::Node).collect(),
                )
                .into(),
            ])
            .into(),
        ],
    )
}

fn App(_props: &Props) -> Element {
    let (counter, set_counter) = use_state(1i64);
    let (toggle, set_toggle) = use_state(false);

    let count_button = |set_counter: SetState<i64>, counter: i64| {
        Element::component(
            Button,
            Props::new().on("click", move |_| set_counter.update(|p| p + 1)),
            vec![format!("Count: {counter}").into()],
        )
    };

    Element::host("div", Props::new(), vec![
        "Some text".into(),
        Element::component(
            Button,
            Props::new().on("click", move |_| set_toggle.update(|p| !p)),
            vec![format!("Toggle: {toggle}").into()],
        )
        .into(),
        Child::from(toggle.then(|| count_button(set_counter.clone(), counter))),
        Element::host("div", Props::new().set("style", "max-width: 400px;"), vec![
            Element::component(
                Panel,
                Props::new().set("title", format!("Some panel title {counter}")),
                vec![
                    Child::from(toggle.then(|| {
                        Element::host("div", Props::new(), vec![
                            count_button(set_counter.clone(), counter).into(),
                        ])
                    })),
                    "Panel content text".into(),
                ],
            )
            .into(),
        ])
        .into(),
    ])
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let host = Rc::new(RefCell::new(TreeHost::new()));
    let backend: Rc<RefCell<dyn HostBackend>> = host.clone();
    let container = host.borrow().container();
    let _runtime = render(Element::component(App, Props::new(), vec![]), backend, container);

    println!("mounted:\n{}", host.borrow().dump());

    // Flip the toggle: two more count buttons appear.
    let toggle_button = host.borrow().find_all("button")[0];
    dispatch(&host, toggle_button, &Event::click())?;
    println!("after toggle:\n{}", host.borrow().dump());

    // Count twice through the second button.
    let count_button = host.borrow().find_all("button")[1];
    dispatch(&host, count_button, &Event::click())?;
    dispatch(&host, count_button, &Event::click())?;

    // Type into the panel's input field.
    let input = host.borrow().find_all("input")[0];
    dispatch(&host, input, &Event::input("hello rejoin"))?;

    println!("after two counts and some typing:\n{}", host.borrow().dump());
    Ok(())
}
