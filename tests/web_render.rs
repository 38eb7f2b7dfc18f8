#![cfg(target_arch = "wasm32")]

use sprig_dom::{bind, children, mount, safe, safe_or, Child, Error, Props, RenderHandle, Tags};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Element, Event};

wasm_bindgen_test_configure!(run_in_browser);

use web_support_::{document, init};

fn spans(html: &Tags, count: usize) -> Result<Vec<Element>, Error> {
	(0..count).map(|i| html.create("span", Props::new(), children![i])).collect()
}

#[wasm_bindgen_test]
fn root_is_stable_across_shapes() {
	init();
	let html = Tags::html().unwrap();
	let handle = bind(move |count: usize| spans(&html, count));
	assert!(handle.container().is_none());

	let root = handle.invoke(1).unwrap();
	assert_eq!(root.child_element_count(), 1);

	assert_eq!(handle.invoke(2).unwrap(), root);
	assert_eq!(root.child_element_count(), 2);
	assert_eq!(root.text_content().as_deref(), Some("01"));
	assert_eq!(handle.retained_len(), 2);

	assert_eq!(handle.invoke(0).unwrap(), root);
	assert_eq!(root.child_nodes().length(), 0);
	assert_eq!(handle.container(), Some(root));
}

#[wasm_bindgen_test]
fn optional_and_single_output() {
	init();
	let html = Tags::html().unwrap();
	let handle = bind(move |show: bool| -> Result<Vec<Option<Element>>, Error> {
		Ok(vec![html.create("b", Props::new(), children!["x"]).ok(), if show { Some(html.create("i", Props::new(), children!["y"])?) } else { None }])
	});

	let root = handle.invoke(false).unwrap();
	assert_eq!(root.inner_html(), "<b>x</b>");
	handle.invoke(true).unwrap();
	assert_eq!(root.inner_html(), "<b>x</b><i>y</i>");
}

#[wasm_bindgen_test]
fn container_stays_in_place_when_mounted() {
	init();
	let html = Tags::html().unwrap();
	let handle = bind(move |text: &'static str| html.create("p", Props::new(), children![text])).with_container_tag("section");

	let container = document().create_element("div").unwrap();
	mount(&container, children!["before", handle.invoke("first").unwrap(), "after"]);
	handle.invoke("second").unwrap();

	assert_eq!(container.child_nodes().length(), 3);
	assert_eq!(container.text_content().as_deref(), Some("beforesecondafter"));
	assert_eq!(handle.container().unwrap().tag_name(), "SECTION");
}

#[wasm_bindgen_test]
fn producer_error_changes_nothing() {
	init();
	let html = Tags::html().unwrap();
	let handle = bind(move |fail: bool| if fail { Err(Error::Child("boom".to_owned())) } else { html.create("p", Props::new(), children!["ok"]) });

	let root = handle.invoke(false).unwrap();
	assert_eq!(handle.invoke(true), Err(Error::Child("boom".to_owned())));
	assert_eq!(root.inner_html(), "<p>ok</p>");
	assert_eq!(handle.retained_len(), 1);
}

#[wasm_bindgen_test]
fn unplaceable_output_changes_nothing() {
	init();
	let html = Tags::html().unwrap();
	let wrapper = document().create_element("div").unwrap();
	let handle = bind({
		let wrapper = wrapper.clone();
		move |nest: bool| -> Result<Vec<Element>, Error> {
			let p = html.create("p", Props::new(), children!["ok"])?;
			Ok(if nest { vec![p, wrapper.clone()] } else { vec![p] })
		}
	});

	let root = handle.invoke(false).unwrap();
	mount(&wrapper, children![&root]);

	assert!(matches!(handle.invoke(true), Err(Error::Dom(_))));
	assert_eq!(root.inner_html(), "<p>ok</p>");
	assert_eq!(root.parent_element(), Some(wrapper.clone()));
	assert_eq!(handle.retained_len(), 1);
}

#[wasm_bindgen_test]
fn own_container_is_refused() {
	init();
	let slot: Rc<RefCell<Option<Element>>> = Rc::default();
	let handle = bind({
		let slot = Rc::clone(&slot);
		move |()| -> Result<Option<Element>, Error> { Ok(slot.borrow().clone()) }
	});

	let root = handle.invoke(()).unwrap();
	*slot.borrow_mut() = Some(root.clone());
	assert!(matches!(handle.invoke(()), Err(Error::Dom(_))));
	assert_eq!(root.child_nodes().length(), 0);
}

#[wasm_bindgen_test]
fn reentrant_invocation_is_refused() {
	init();
	let slot: Rc<RefCell<Option<RenderHandle<(), (), Error>>>> = Rc::default();
	let inner_result = Rc::new(RefCell::new(None));

	let handle = bind({
		let slot = Rc::clone(&slot);
		let inner_result = Rc::clone(&inner_result);
		move |()| -> Result<(), Error> {
			let handle = slot.borrow().clone();
			if let Some(handle) = handle {
				*inner_result.borrow_mut() = Some(handle.invoke(()));
			}
			Ok(())
		}
	});
	*slot.borrow_mut() = Some(handle.clone());

	handle.invoke(()).unwrap();
	assert_eq!(*inner_result.borrow(), Some(Err(Error::Reentrant)));
}

#[wasm_bindgen_test]
fn event_handler_rerenders() {
	init();
	let html = Tags::html().unwrap();
	let count = Rc::new(RefCell::new(0));

	let slot: Rc<RefCell<Option<RenderHandle<(), Element, Error>>>> = Rc::default();
	let handle = bind({
		let html = html.clone();
		let count = Rc::clone(&count);
		let slot = Rc::clone(&slot);
		move |()| {
			let current = *count.borrow();
			html.create(
				"button",
				Props::new().on("onClick", {
					let count = Rc::clone(&count);
					let slot = Rc::clone(&slot);
					move |_| {
						*count.borrow_mut() += 1;
						let handle = slot.borrow().clone();
						if let Some(handle) = handle {
							handle.invoke(()).unwrap();
						}
					}
				}),
				children![current],
			)
		}
	});
	*slot.borrow_mut() = Some(handle.clone());

	let root = handle.invoke(()).unwrap();
	assert_eq!(root.text_content().as_deref(), Some("0"));

	root.first_element_child().unwrap().dispatch_event(&Event::new("click").unwrap()).unwrap();
	assert_eq!(root.text_content().as_deref(), Some("1"));
	assert_eq!(root.child_element_count(), 1);
}

#[wasm_bindgen_test]
fn safe_fallbacks() {
	init();
	let html = Tags::html().unwrap();

	let ok = safe(|| html.create("div", Props::new(), children!["Content"]));
	assert!(matches!(ok, Child::Node(node) if node.text_content().as_deref() == Some("Content")));

	let failed = safe(|| Err::<Element, _>(Error::Child("Boom".to_owned())));
	assert!(matches!(failed, Child::Text(text) if text == "Error"));

	let custom = safe_or(|| Err::<Element, _>("Boom"), "Custom Error Message");
	assert!(matches!(custom, Child::Text(text) if text == "Custom Error Message"));

	let fallback = html.create("span", Props::new().set("class", "error"), children!["Failed!"]).unwrap();
	let element = safe_or(|| Err::<Element, _>("Boom"), &fallback);
	assert!(matches!(element, Child::Node(node) if node == web_sys::Node::from(fallback.clone())));
}
