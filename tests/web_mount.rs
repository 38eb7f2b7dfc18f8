#![cfg(target_arch = "wasm32")]

use sprig_dom::{children, mount, Props, Tags};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

use web_support_::{document, init};

#[wasm_bindgen_test]
fn by_id() {
	init();
	let document = document();
	let app = document.create_element("div").unwrap();
	app.set_id("mount-by-id");
	document.body().unwrap().append_child(&app).unwrap();

	let div = Tags::html().unwrap().create("div", Props::new(), children!["hello"]).unwrap();
	mount("mount-by-id", children![div]);

	assert_eq!(app.inner_html(), "<div>hello</div>");
	app.remove();
}

#[wasm_bindgen_test]
fn by_element() {
	init();
	let container = document().create_element("div").unwrap();
	let span = Tags::html().unwrap().create("span", Props::new(), children!["world"]).unwrap();
	mount(&container, children![span]);

	assert_eq!(container.inner_html(), "<span>world</span>");
}

#[wasm_bindgen_test]
fn several_children_in_order() {
	init();
	let html = Tags::html().unwrap();
	let container = document().create_element("div").unwrap();
	mount(
		&container,
		children![
			html.create("span", Props::new().set("id", "1"), children!["one"]).unwrap(),
			html.create("span", Props::new().set("id", "2"), children!["two"]).unwrap(),
		],
	);

	assert_eq!(container.child_element_count(), 2);
	assert_eq!(container.first_element_child().unwrap().text_content().as_deref(), Some("one"));
	assert_eq!(container.last_element_child().unwrap().text_content().as_deref(), Some("two"));
}

#[wasm_bindgen_test]
fn no_children_clears() {
	init();
	let container = document().create_element("div").unwrap();
	container.set_inner_html("<span>initial</span>");

	mount(&container, children![]);

	assert_eq!(container.inner_html(), "");
	assert_eq!(container.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn remount_replaces_everything() {
	init();
	let html = Tags::html().unwrap();
	let container = document().create_element("div").unwrap();

	let a = html.create("div", Props::new().set("id", "a"), children!["A"]).unwrap();
	mount(&container, children![&a, "tail"]);
	assert_eq!(container.first_element_child().unwrap().id(), "a");

	let b = html.create("div", Props::new().set("id", "b"), children!["B"]).unwrap();
	let c = html.create("div", Props::new().set("id", "c"), children!["C"]).unwrap();
	mount(&container, children![b, c]);

	assert_eq!(container.inner_html(), r#"<div id="b">B</div><div id="c">C</div>"#);
	assert!(a.parent_node().is_none());
}

#[wasm_bindgen_test]
fn unresolved_target_is_a_no_op() {
	init();
	mount("there-is-no-such-id", children!["ignored"]);
	assert!(document().get_element_by_id("there-is-no-such-id").is_none());
}
