//! Interactive step wizard
//!
//! A prompt-driven front end over [`WizardState`]. Every form reads and
//! writes the state through its public operations; navigation goes through
//! `next`/`back` so step gates apply exactly as they do for library users.

use std::path::PathBuf;

use dialoguer::{Confirm, Input, MultiSelect, Password, Select};
use tracing::debug;

use crate::devexp::{render, RenderOptions};
use crate::errors::Result;
use crate::external::{import_into, AuthKind, ExternalAuth};
use crate::mock::TestRunner;
use crate::output::review::format_review;
use crate::output::{table, Clipboard, FileClipboard, Painter};
use crate::request::SecretString;
use crate::schema::{catalog, validation, FieldDescriptor, FieldType, FilterType, HttpMethod};
use crate::sessions::ConfigStore;
use crate::signals;
use crate::wizard::{steps, IntegrationDirection, StepId, WizardState};

/// Navigation choice at the bottom of every step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nav {
    Next,
    Back,
    Edit,
    Save,
    Quit,
}

impl Nav {
    fn label(&self, last: bool) -> &'static str {
        match self {
            Nav::Next if last => "Finish",
            Nav::Next => "Next",
            Nav::Back => "Back",
            Nav::Edit => "Edit this step again",
            Nav::Save => "Save configuration",
            Nav::Quit => "Quit",
        }
    }
}

struct Wizard<'a> {
    state: WizardState,
    store: &'a mut dyn ConfigStore,
    runner: &'a TestRunner,
    painter: Painter,
}

/// Run the wizard until the user finishes or quits
pub async fn run_wizard(
    state: WizardState,
    store: &mut dyn ConfigStore,
    runner: &TestRunner,
    painter: Painter,
) -> Result<()> {
    let mut wizard = Wizard {
        state,
        store,
        runner,
        painter,
    };
    wizard.run().await
}

impl Wizard<'_> {
    async fn run(&mut self) -> Result<()> {
        println!("{}", self.painter.label("hrbridge integration wizard"));
        loop {
            signals::check_interrupted()?;
            self.print_progress();
            self.edit_step(self.state.current_step()).await?;

            loop {
                signals::check_interrupted()?;
                match self.navigation()? {
                    Nav::Next => {
                        let finishing = self.state.is_last_step();
                        match self.state.next() {
                            Ok(_) if finishing => {
                                self.offer_save()?;
                                return Ok(());
                            }
                            Ok(_) => break,
                            Err(e) => println!("{}", self.painter.warning(&e.to_string())),
                        }
                    }
                    Nav::Back => {
                        self.state.back();
                        break;
                    }
                    Nav::Edit => break,
                    Nav::Save => self.save()?,
                    Nav::Quit => {
                        if Confirm::new()
                            .with_prompt("Quit without saving?")
                            .default(false)
                            .interact()?
                        {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    fn print_progress(&self) {
        let (position, total) = self.state.progress();
        let titles: Vec<String> = steps::labelled(self.state.direction())
            .into_iter()
            .map(|(step, label)| {
                if step == self.state.current_step() {
                    self.painter.label(label)
                } else {
                    self.painter.muted(label)
                }
            })
            .collect();
        println!();
        println!("{}", titles.join(" > "));
        println!(
            "{}",
            self.painter.label(&format!(
                "Step {} of {}: {}",
                position,
                total,
                steps::label(self.state.current_step(), self.state.direction())
            ))
        );
    }

    fn navigation(&self) -> Result<Nav> {
        let last = self.state.is_last_step();
        let mut options = vec![Nav::Next];
        if !self.state.is_first_step() {
            options.push(Nav::Back);
        }
        options.extend([Nav::Edit, Nav::Save, Nav::Quit]);
        let labels: Vec<&str> = options.iter().map(|n| n.label(last)).collect();
        let choice = Select::new()
            .with_prompt("Continue")
            .items(&labels)
            .default(0)
            .interact()?;
        Ok(options[choice])
    }

    async fn edit_step(&mut self, step: StepId) -> Result<()> {
        debug!(step = ?step, "editing step");
        match step {
            StepId::Direction => self.direction(),
            StepId::HrEndpoint => self.hr_endpoint(),
            StepId::HrFields => self.hr_fields(),
            StepId::Filters => self.filters(),
            StepId::RequestDetails => self.request_details(),
            StepId::ExternalEndpoint => self.external_endpoint().await,
            StepId::ExternalFields => self.external_fields(),
            StepId::FieldMapping => self.field_mapping(),
            StepId::Review => self.review(),
            StepId::Test => self.test_request().await,
        }
    }

    // ====================================================================
    // Direction and HR request
    // ====================================================================

    fn direction(&mut self) -> Result<()> {
        let labels: Vec<String> = IntegrationDirection::ALL
            .iter()
            .map(|d| format!("{} - {}", d.label(), d.description()))
            .collect();
        let current = self
            .state
            .direction()
            .and_then(|d| IntegrationDirection::ALL.iter().position(|x| *x == d))
            .unwrap_or(0);
        let choice = Select::new()
            .with_prompt("Integration direction")
            .items(&labels)
            .default(current)
            .interact()?;
        self.state.set_direction(IntegrationDirection::ALL[choice]);
        Ok(())
    }

    fn hr_endpoint(&mut self) -> Result<()> {
        let key: String = Password::new()
            .with_prompt(format!(
                "ZenHR API key [{}] (leave empty to keep)",
                self.state.api_key().masked()
            ))
            .allow_empty_password(true)
            .interact()?;
        if !key.trim().is_empty() {
            self.state.set_api_key(key.trim());
        }

        let endpoints = catalog::endpoints();
        let labels: Vec<String> = endpoints
            .iter()
            .map(|e| format!("{} - {}", e.name, e.description))
            .collect();
        let current = endpoints
            .iter()
            .position(|e| e.id == self.state.endpoint())
            .unwrap_or(0);
        let choice = Select::new()
            .with_prompt("Endpoint")
            .items(&labels)
            .default(current)
            .interact()?;
        let chosen = endpoints[choice].id.clone();
        if chosen != self.state.endpoint() {
            self.state.set_endpoint(&chosen)?;
        }

        let methods: Vec<&str> = HttpMethod::ALL.iter().map(|m| m.as_str()).collect();
        let current = HttpMethod::ALL
            .iter()
            .position(|m| *m == self.state.method())
            .unwrap_or(0);
        let choice = Select::new()
            .with_prompt("Method")
            .items(&methods)
            .default(current)
            .interact()?;
        if HttpMethod::ALL[choice] != self.state.method() {
            self.state.set_method(HttpMethod::ALL[choice]);
        }

        // the import ordering has no field step of its own
        if !self.state.active_steps().contains(&StepId::HrFields) {
            self.hr_fields()?;
        }
        Ok(())
    }

    fn hr_fields(&mut self) -> Result<()> {
        let mut categories = vec!["All categories".to_string()];
        categories.extend(catalog::categories(self.state.endpoint()));
        let category = if categories.len() > 2 {
            let choice = Select::new()
                .with_prompt("Category")
                .items(&categories)
                .default(0)
                .interact()?;
            (choice > 0).then(|| categories[choice].clone())
        } else {
            None
        };
        let term: String = Input::new()
            .with_prompt("Search fields (empty for all)")
            .allow_empty(true)
            .interact_text()?;

        let shown: Vec<FieldDescriptor> = self
            .state
            .available_fields()
            .iter()
            .filter(|f| category.is_none() || f.category == category)
            .filter(|f| term.trim().is_empty() || f.matches(term.trim()))
            .cloned()
            .collect();
        if shown.is_empty() {
            println!("{}", self.painter.muted("No fields match"));
            return Ok(());
        }

        let labels: Vec<String> = shown
            .iter()
            .map(|f| {
                let marker = if self.state.is_field_required(&f.id) { " *" } else { "" };
                format!("{} ({}, {}){}", f.name, f.id, f.field_type, marker)
            })
            .collect();
        let checked: Vec<bool> = shown
            .iter()
            .map(|f| self.state.is_field_selected(&f.id))
            .collect();
        let picked = MultiSelect::new()
            .with_prompt("Fields (space to toggle)")
            .items(&labels)
            .defaults(&checked)
            .interact()?;
        for (i, field) in shown.iter().enumerate() {
            if picked.contains(&i) != checked[i] {
                self.state.toggle_field(&field.id);
            }
        }
        println!(
            "{}",
            self.painter
                .muted(&format!("{} fields selected", self.state.selected_fields().len()))
        );

        if self.state.method() == HttpMethod::Get {
            if Confirm::new()
                .with_prompt("Set filters and pagination?")
                .default(false)
                .interact()?
            {
                self.filters()?;
            }
        } else {
            self.request_details()?;
        }
        Ok(())
    }

    fn filters(&mut self) -> Result<()> {
        let endpoint = self.state.endpoint().to_string();
        for filter in catalog::filters(&endpoint) {
            let current = self.state.filters().get(&filter.id).cloned().unwrap_or_default();
            let value = if filter.filter_type == FilterType::Select {
                let mut options = vec!["(any)".to_string()];
                options.extend(filter.options.clone().unwrap_or_default());
                let default = options.iter().position(|o| *o == current).unwrap_or(0);
                let choice = Select::new()
                    .with_prompt(&filter.name)
                    .items(&options)
                    .default(default)
                    .interact()?;
                if choice == 0 {
                    String::new()
                } else {
                    options[choice].clone()
                }
            } else {
                let hint = catalog::filter_hint(&endpoint, &filter.id)
                    .map(|h| format!(" (e.g. {})", h.example))
                    .unwrap_or_default();
                Input::new()
                    .with_prompt(format!("{}{}", filter.name, hint))
                    .with_initial_text(current)
                    .allow_empty(true)
                    .interact_text()?
            };
            self.state.set_filter(&filter.id, value.trim());
        }

        let pagination = self.state.pagination();
        let page: u32 = Input::new()
            .with_prompt("Page")
            .default(pagination.page)
            .interact_text()?;
        let per_page: u32 = Input::new()
            .with_prompt("Per page")
            .default(pagination.per_page)
            .interact_text()?;
        self.state.set_pagination(page, per_page);
        Ok(())
    }

    fn request_details(&mut self) -> Result<()> {
        let endpoint = self.state.endpoint().to_string();
        let mut ids: Vec<String> = Vec::new();
        if matches!(self.state.method(), HttpMethod::Put | HttpMethod::Delete) {
            ids.push("id".to_string());
        }
        if self.state.method() != HttpMethod::Delete {
            ids.extend(self.state.required_fields().iter().cloned());
            ids.extend(
                self.state
                    .selected_fields()
                    .iter()
                    .filter(|f| !self.state.required_fields().contains(f))
                    .cloned(),
            );
        }

        for id in ids {
            let name = catalog::field(&endpoint, &id)
                .map(|f| f.name)
                .unwrap_or_else(|| catalog::display_name(&id));
            let marker = if self.state.is_field_required(&id) || id == "id" { " *" } else { "" };
            let current = self.state.field_values().get(&id).cloned().unwrap_or_default();
            let value: String = Input::new()
                .with_prompt(format!("{}{}", name, marker))
                .with_initial_text(current)
                .allow_empty(true)
                .interact_text()?;
            if let Some(problem) = validation::validate_value(&endpoint, &id, &value) {
                println!("  {}", self.painter.warning(&problem));
            }
            self.state.set_field_value(&id, &value);
        }
        Ok(())
    }

    // ====================================================================
    // External side
    // ====================================================================

    async fn external_endpoint(&mut self) -> Result<()> {
        let system = self.state.external_system().clone();
        let name: String = Input::new()
            .with_prompt("System name")
            .with_initial_text(system.name.clone())
            .allow_empty(true)
            .interact_text()?;
        let base_url: String = Input::new()
            .with_prompt("Base URL")
            .with_initial_text(system.base_url.clone())
            .allow_empty(true)
            .interact_text()?;
        let endpoint: String = Input::new()
            .with_prompt("Endpoint path")
            .with_initial_text(system.endpoint.clone())
            .allow_empty(true)
            .interact_text()?;
        let methods: Vec<&str> = HttpMethod::ALL.iter().map(|m| m.as_str()).collect();
        let method = Select::new()
            .with_prompt("Method")
            .items(&methods)
            .default(HttpMethod::ALL.iter().position(|m| *m == system.method).unwrap_or(0))
            .interact()?;

        let kinds: Vec<&str> = AuthKind::ALL.iter().map(|k| k.label()).collect();
        let kind_index = Select::new()
            .with_prompt("Authentication")
            .items(&kinds)
            .default(AuthKind::ALL.iter().position(|k| *k == system.auth.kind()).unwrap_or(0))
            .interact()?;
        let kind = AuthKind::ALL[kind_index];

        {
            let external = self.state.external_system_mut();
            external.name = name.trim().to_string();
            external.base_url = base_url.trim().to_string();
            external.endpoint = endpoint.trim().to_string();
            external.method = HttpMethod::ALL[method];
            if kind != external.auth.kind() {
                external.set_auth_kind(kind);
            }
        }
        let auth = self.prompt_auth(kind)?;
        if let Some(auth) = auth {
            self.state.external_system_mut().auth = auth;
        }

        if self.state.external_system().is_ready()
            && Confirm::new()
                .with_prompt("Test the connection now?")
                .default(true)
                .interact()?
        {
            let discover = Confirm::new()
                .with_prompt("Fetch the field list from the API?")
                .default(self.state.external_fields().is_empty())
                .interact()?;
            println!("{}", self.painter.muted("Testing connection..."));
            match self
                .runner
                .test_connection(self.state.external_system(), discover)
                .await
            {
                Ok(outcome) => {
                    println!("{}", self.painter.success(&outcome.message));
                    if let Some(fields) = outcome.discovered {
                        println!("{}", table::fields_table(&fields, &[]));
                        self.state.apply_discovered_fields(fields);
                    }
                }
                Err(e) => println!("{}", self.painter.error(&e.to_string())),
            }
        }
        Ok(())
    }

    /// Credentials for `kind`; None keeps what is stored
    fn prompt_auth(&self, kind: AuthKind) -> Result<Option<ExternalAuth>> {
        let secret = |prompt: &str| -> Result<String> {
            Ok(Password::new()
                .with_prompt(format!("{} (leave empty to keep)", prompt))
                .allow_empty_password(true)
                .interact()?)
        };
        let keep = |new: String, old: &SecretString| {
            if new.is_empty() {
                old.clone()
            } else {
                SecretString::new(new)
            }
        };

        let auth = match (kind, &self.state.external_system().auth) {
            (AuthKind::None, _) => return Ok(None),
            (AuthKind::Basic, ExternalAuth::Basic { username, password }) => {
                let username: String = Input::new()
                    .with_prompt("Username")
                    .with_initial_text(username.clone())
                    .allow_empty(true)
                    .interact_text()?;
                ExternalAuth::Basic {
                    username: username.trim().to_string(),
                    password: keep(secret("Password")?, password),
                }
            }
            (AuthKind::Bearer, ExternalAuth::Bearer { token }) => ExternalAuth::Bearer {
                token: keep(secret("Token")?, token),
            },
            (AuthKind::ApiKey, ExternalAuth::ApiKey { key, value }) => {
                let key: String = Input::new()
                    .with_prompt("Header name")
                    .with_initial_text(key.clone())
                    .allow_empty(true)
                    .interact_text()?;
                ExternalAuth::ApiKey {
                    key: key.trim().to_string(),
                    value: keep(secret("Key value")?, value),
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(auth))
    }

    fn external_fields(&mut self) -> Result<()> {
        const ACTIONS: [&str; 6] = [
            "Add a field",
            "Edit a field",
            "Remove a field",
            "Import from file (JSON or CSV)",
            "Search",
            "Done",
        ];
        loop {
            signals::check_interrupted()?;
            println!("{}", table::fields_table(self.state.external_fields().as_slice(), &[]));
            let action = Select::new()
                .with_prompt("External fields")
                .items(&ACTIONS)
                .default(0)
                .interact()?;
            let result = match action {
                0 => self.add_external_field(),
                1 => self.edit_external_field(),
                2 => self.remove_external_field(),
                3 => self.import_external_fields(),
                4 => self.search_external_fields(),
                _ => return Ok(()),
            };
            if let Err(e) = result {
                println!("{}", self.painter.warning(&e.to_string()));
            }
        }
    }

    fn prompt_field(&self, existing: Option<&FieldDescriptor>) -> Result<FieldDescriptor> {
        let id = match existing {
            Some(field) => field.id.clone(),
            None => Input::<String>::new()
                .with_prompt("Field ID")
                .allow_empty(true)
                .interact_text()?,
        };
        let name: String = Input::new()
            .with_prompt("Display name")
            .with_initial_text(existing.map(|f| f.name.clone()).unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;
        let types: Vec<&str> = FieldType::ALL.iter().map(|t| t.as_str()).collect();
        let current = existing
            .and_then(|f| FieldType::ALL.iter().position(|t| *t == f.field_type))
            .unwrap_or(0);
        let field_type = Select::new()
            .with_prompt("Type")
            .items(&types)
            .default(current)
            .interact()?;
        let description: String = Input::new()
            .with_prompt("Description")
            .with_initial_text(
                existing
                    .and_then(|f| f.description.clone())
                    .unwrap_or_default(),
            )
            .allow_empty(true)
            .interact_text()?;

        let mut field = FieldDescriptor::new(id, name, FieldType::ALL[field_type]);
        if !description.trim().is_empty() {
            field = field.with_description(description.trim());
        }
        Ok(field)
    }

    fn pick_external_field(&self, prompt: &str) -> Result<Option<usize>> {
        let fields = self.state.external_fields();
        if fields.is_empty() {
            println!("{}", self.painter.muted("No fields yet"));
            return Ok(None);
        }
        let labels: Vec<String> = fields.iter().map(|f| format!("{} ({})", f.name, f.id)).collect();
        let choice = Select::new()
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact()?;
        Ok(Some(choice))
    }

    fn add_external_field(&mut self) -> Result<()> {
        let field = self.prompt_field(None)?;
        self.state.external_fields_mut().add_field(field)?;
        Ok(())
    }

    fn edit_external_field(&mut self) -> Result<()> {
        let Some(index) = self.pick_external_field("Edit which field")? else {
            return Ok(());
        };
        let existing = self.state.external_fields().get(index).cloned();
        let field = self.prompt_field(existing.as_ref())?;
        self.state.external_fields_mut().update_field(index, field)?;
        Ok(())
    }

    fn remove_external_field(&mut self) -> Result<()> {
        let Some(index) = self.pick_external_field("Remove which field")? else {
            return Ok(());
        };
        let removed = self.state.external_fields_mut().remove_field(index, |field| {
            Confirm::new()
                .with_prompt(format!("Remove '{}'?", field.name))
                .default(false)
                .interact()
                .unwrap_or(false)
        })?;
        if let Some(field) = removed {
            println!("{}", self.painter.muted(&format!("Removed {}", field.id)));
        }
        Ok(())
    }

    fn import_external_fields(&mut self) -> Result<()> {
        let path: String = Input::new().with_prompt("File path").interact_text()?;
        let raw = std::fs::read(PathBuf::from(path.trim()))?;
        let report = import_into(self.state.external_fields_mut(), &raw)?;
        if report.imported.is_empty() {
            println!("{}", self.painter.warning(&report.to_string()));
        } else {
            println!("{}", self.painter.success(&report.to_string()));
        }
        Ok(())
    }

    fn search_external_fields(&mut self) -> Result<()> {
        let term: String = Input::new().with_prompt("Search").interact_text()?;
        let found: Vec<FieldDescriptor> = self
            .state
            .external_fields()
            .search(term.trim())
            .into_iter()
            .cloned()
            .collect();
        println!("{}", table::fields_table(&found, &[]));
        Ok(())
    }

    // ====================================================================
    // Mapping, review and test
    // ====================================================================

    fn field_mapping(&mut self) -> Result<()> {
        let direction = self.state.effective_direction();
        let hr_fields: Vec<String> = self.state.selected_fields().to_vec();
        let external_fields = self.state.external_fields().ids();
        let (sources, targets) = if direction.is_reversed() {
            (external_fields, hr_fields)
        } else {
            (hr_fields, external_fields)
        };
        if sources.is_empty() {
            println!(
                "{}",
                self.painter.warning(&format!(
                    "No {} fields to map yet",
                    direction.source().label()
                ))
            );
            return Ok(());
        }

        println!(
            "{}",
            self.painter.muted(&format!(
                "Map {} fields to {} fields",
                direction.source().label(),
                direction.target().label()
            ))
        );
        for source in &sources {
            signals::check_interrupted()?;
            let current = self.state.mapping().shown_target(direction, source).map(str::to_string);
            let mut options = vec!["(not mapped)".to_string()];
            let free: Vec<String> = self
                .state
                .mapping()
                .available_targets(direction, &targets)
                .into_iter()
                .map(str::to_string)
                .collect();
            options.extend(free);
            if let Some(current) = &current {
                if !options.contains(current) {
                    options.push(current.clone());
                }
            }
            let free_text = options.len();
            options.push("Type a field id...".to_string());

            let default = current
                .as_ref()
                .and_then(|c| options.iter().position(|o| o == c))
                .unwrap_or(0);
            let choice = Select::new()
                .with_prompt(source.as_str())
                .items(&options)
                .default(default)
                .interact()?;

            let target = if choice == 0 {
                String::new()
            } else if choice == free_text {
                Input::<String>::new().with_prompt("Target field id").interact_text()?
            } else {
                options[choice].clone()
            };
            if let Err(e) = self.state.mapping_mut().assign(direction, source, target.trim()) {
                println!("{}", self.painter.warning(&e.to_string()));
            }
        }

        let summary = self.state.mapping_summary();
        println!(
            "{}",
            self.painter
                .info(&format!("{} mapped, {} unmapped", summary.mapped, summary.unmapped))
        );
        Ok(())
    }

    fn review(&mut self) -> Result<()> {
        let rendered = render(&self.state, &RenderOptions::default());
        print!(
            "{}",
            format_review(&rendered, self.state.effective_direction(), self.painter)
        );

        if Confirm::new()
            .with_prompt("Copy the request to a file?")
            .default(false)
            .interact()?
        {
            let path: String = Input::new()
                .with_prompt("Path")
                .default("request.json".to_string())
                .interact_text()?;
            let mut clipboard = FileClipboard::new(path.trim());
            if clipboard.copy(&rendered.copy_payload) {
                println!("{}", self.painter.success("Copied!"));
            } else {
                println!("{}", self.painter.error("Copy failed"));
            }
        }
        Ok(())
    }

    async fn test_request(&mut self) -> Result<()> {
        if !Confirm::new()
            .with_prompt("Send a test request?")
            .default(true)
            .interact()?
        {
            return Ok(());
        }
        println!("{}", self.painter.muted("Sending request..."));
        match self.runner.run_request(&self.state).await {
            Ok(response) => crate::core::print_response(&response, self.painter),
            Err(e) => println!("{}", self.painter.warning(&e.to_string())),
        }
        Ok(())
    }

    // ====================================================================
    // Saving
    // ====================================================================

    fn save(&mut self) -> Result<()> {
        let name: String = Input::new()
            .with_prompt("Configuration name")
            .allow_empty(true)
            .interact_text()?;
        match self.state.snapshot(&name) {
            Ok(saved) => {
                let id = saved.id.clone();
                self.store.save(saved)?;
                println!("{}", self.painter.success(&format!("Saved as {}", id)));
            }
            Err(e) => println!("{}", self.painter.warning(&e.to_string())),
        }
        Ok(())
    }

    fn offer_save(&mut self) -> Result<()> {
        if Confirm::new()
            .with_prompt("Save this configuration?")
            .default(true)
            .interact()?
        {
            self.save()?;
        }
        Ok(())
    }
}
