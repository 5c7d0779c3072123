//! Headless mode: run one interaction and return the rendered page.

use micrographia_core::{Action, Candidate, Controller, GramFilter, TaxonomyApi};

/// One interaction to perform without a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Script {
    Search { term: String, filter: GramFilter },
    Detail { tax_id: String },
    /// Mark each identifier for comparison in order, then compare.
    Compare { tax_ids: Vec<String> },
}

/// Drive a fresh controller through `script` against `api`.
pub async fn run_script<A: TaxonomyApi>(api: &A, script: Script) -> Controller {
    let mut controller = Controller::new();
    match script {
        Script::Search { term, filter } => {
            controller.run(api, Action::Search { term, filter }).await;
        }
        Script::Detail { tax_id } => {
            controller.run(api, Action::ShowDetail { tax_id }).await;
        }
        Script::Compare { tax_ids } => {
            for tax_id in tax_ids {
                let name = format!("TaxID {tax_id}");
                controller
                    .run(
                        api,
                        Action::ToggleCompare {
                            candidate: Candidate::new(tax_id, name),
                            checked: true,
                        },
                    )
                    .await;
            }
            controller.run(api, Action::Compare).await;
        }
    }
    controller
}

/// A serialised page and the fatal banner it carries, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub fatal: Option<String>,
}

/// Run `script` and serialise the resulting page.
pub async fn render_script<A: TaxonomyApi>(api: &A, script: Script) -> Rendered {
    let controller = run_script(api, script).await;
    let page = controller.page();
    let fatal = page
        .banner
        .as_ref()
        .filter(|_| page.has_fatal_error())
        .map(|b| b.message.clone());
    Rendered {
        html: controller.render().to_html(),
        fatal,
    }
}
