//! View rendering for the dashboard.

use super::{ActiveModal, Dashboard, Tab};

impl Dashboard {
    /// Renders the whole session: header, then the active modal or the
    /// base view for the active tab, then the status bar.
    pub(super) fn render(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.render_header());
        output.push('\n');

        let body_height = usize::from(self.height).saturating_sub(4);
        let width = usize::from(self.width);

        let body = match &self.modal {
            Some(ActiveModal::AuthorPicker(picker)) => picker.view(width),
            Some(ActiveModal::Detail(detail)) => {
                detail.view(width, body_height, self.spinner_frame())
            }
            Some(ActiveModal::DirtyConfirm(confirm)) => confirm.view(),
            Some(ActiveModal::Checkout(checkout)) => checkout.view(self.spinner_frame()),
            None => self.render_tab_body(width, body_height),
        };
        output.push_str(&body);

        output.push('\n');
        output.push_str(&self.render_status_bar());
        output
    }

    fn render_header(&self) -> String {
        let name = self
            .repository
            .as_ref()
            .map_or("(loading repository)", |repo| repo.name.as_str());
        let host = self.host.map_or("", |host| host.as_str());
        let branch = self.current_branch.as_deref().unwrap_or("?");
        let spinner = if self.is_animating() {
            format!(" {}", self.spinner_frame())
        } else {
            String::new()
        };
        let mut header = format!("{name} [{host}] on {branch}{spinner}");
        if let Some(error) = &self.error {
            header.push_str(&format!("\nError: {error}"));
        }
        header
    }

    fn render_tab_body(&self, width: usize, height: usize) -> String {
        let tabs = format!(
            "{} | {}",
            Self::tab_label(Tab::Requests, self.active_tab),
            Self::tab_label(Tab::Repository, self.active_tab),
        );
        let body = match self.active_tab {
            Tab::Requests => {
                if self.loading {
                    format!("{} Loading requests...", self.spinner_frame())
                } else {
                    self.request_list.view(width, height.saturating_sub(2))
                }
            }
            Tab::Repository => self.render_repository_tab(),
        };
        format!("{tabs}\n\n{body}")
    }

    fn render_repository_tab(&self) -> String {
        let Some(repo) = &self.repository else {
            return "Repository info not loaded yet.".to_owned();
        };
        let mut lines = vec![repo.name.clone()];
        if !repo.description.is_empty() {
            lines.push(repo.description.clone());
        }
        lines.push(format!("default branch: {}", repo.default_branch));
        if let Some(branch) = &self.current_branch {
            lines.push(format!("current branch: {branch}"));
        }
        lines.join("\n")
    }

    fn tab_label(tab: Tab, active: Tab) -> String {
        if tab == active {
            format!("[{}]", tab.label())
        } else {
            format!(" {} ", tab.label())
        }
    }

    fn render_status_bar(&self) -> String {
        format!(
            "author: {}  |  enter: detail  a: author  m: default branch  w: browser  \
             /: search  r: refresh  tab: view  q: quit",
            self.author
        )
    }
}
