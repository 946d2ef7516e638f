//! Counter and message app rendered into an in-memory document.
//!
//! Clicks are simulated; the page HTML is printed after each one. Run with
//! `RUST_LOG=debug` to watch the render passes.

use sprig::prelude::*;

pub const GREETING: &str = "Hello, World!";

pub fn app(hooks: &Hooks) -> Element {
    let (count, set_count) = hooks.use_state(0);
    let (message, set_message) = hooks.use_state(GREETING.to_string());

    let decrement = set_count.clone();
    let next_message = if message == GREETING {
        "State updated!"
    } else {
        GREETING
    };

    div()
        .child(h1().child("Custom React with useState Hook"))
        .child(
            div()
                .child(p().child(format!("Count: {count}")))
                .child(
                    button()
                        .on("click", move |_| set_count.set(count + 1))
                        .child("Increment"),
                )
                .child(
                    button()
                        .on("click", move |_| decrement.set(count - 1))
                        .child("Decrement"),
                ),
        )
        .child(
            div().child(p().child(message)).child(
                button()
                    .on("click", move |_| set_message.set(next_message.to_string()))
                    .child("Change Message"),
            ),
        )
}

fn click_button(document: &Document, label: &str) {
    let target = document
        .elements_by_tag_name(document.body(), "button")
        .into_iter()
        .find(|&button| document.text_content(button) == label);
    match target {
        Some(button) => {
            if let Err(err) = document.click(button) {
                log::error!("click on {label:?} failed: {err}");
            }
        }
        None => log::warn!("no button labelled {label:?}"),
    }
}

fn main() -> Result<(), sprig::RenderError> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let document = Document::with_mount_point("root");
    let root = Root::mount(document.clone(), RootConfig::default())?;
    root.render(app)?;
    println!("{}", document.inner_html(document.body()));

    for label in ["Increment", "Increment", "Decrement", "Change Message"] {
        click_button(&document, label);
        println!("after {label:>14}: {}", document.inner_html(document.body()));
    }

    if let Some(err) = root.take_error() {
        log::error!("last render failed: {err}");
    }
    log::info!("{} render passes", root.render_count());
    Ok(())
}
