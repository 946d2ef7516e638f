use sprig::prelude::*;

#[path = "../demos/counter.rs"]
#[allow(dead_code)]
mod demo;

use demo::app;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct Page {
    document: Document,
    root: Root<Document>,
}

impl Page {
    fn open() -> Self {
        init_logger();
        let document = Document::with_mount_point("root");
        let root = Root::mount(document.clone(), RootConfig::default()).unwrap();
        root.render(app).unwrap();
        Self { document, root }
    }

    fn click(&self, label: &str) {
        let button = self
            .document
            .elements_by_tag_name(self.document.body(), "button")
            .into_iter()
            .find(|&b| self.document.text_content(b) == label)
            .unwrap_or_else(|| panic!("no button labelled {label}"));
        assert_eq!(self.document.click(button), Ok(1));
    }

    fn paragraphs(&self) -> Vec<String> {
        self.document
            .elements_by_tag_name(*self.root.container(), "p")
            .into_iter()
            .map(|p| self.document.text_content(p))
            .collect()
    }
}

#[test]
fn test_initial_render() {
    let page = Page::open();
    assert_eq!(
        page.document.inner_html(*page.root.container()),
        "<div><h1>Custom React with useState Hook</h1>\
         <div><p>Count: 0</p><button>Increment</button><button>Decrement</button></div>\
         <div><p>Hello, World!</p><button>Change Message</button></div></div>"
    );
    assert_eq!(page.root.render_count(), 1);
}

#[test]
fn test_increment_and_decrement() {
    let page = Page::open();
    page.click("Increment");
    page.click("Increment");
    assert_eq!(page.paragraphs()[0], "Count: 2");
    page.click("Decrement");
    page.click("Decrement");
    page.click("Decrement");
    assert_eq!(page.paragraphs()[0], "Count: -1");
    assert_eq!(page.root.render_count(), 6);
}

#[test]
fn test_message_toggles() {
    let page = Page::open();
    page.click("Change Message");
    assert_eq!(page.paragraphs()[1], "State updated!");
    page.click("Change Message");
    assert_eq!(page.paragraphs()[1], "Hello, World!");
}

#[test]
fn test_states_are_independent() {
    let page = Page::open();
    page.click("Increment");
    page.click("Change Message");
    page.click("Increment");
    assert_eq!(page.paragraphs(), vec!["Count: 2", "State updated!"]);
}

#[test]
fn test_rebuild_discards_old_nodes() {
    let page = Page::open();
    let before = page.document.node_count();
    let old_button = page
        .document
        .elements_by_tag_name(page.document.body(), "button")[0];
    page.click("Increment");

    assert!(!page.document.contains(old_button));
    assert_eq!(page.document.node_count(), before);
    assert_eq!(page.document.children(*page.root.container()).len(), 1);
}
