use std::io::Write;

use checklist_core::{view, ChecklistPage, Transport};
use clap::{ArgAction, Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show every task
    List,
    /// Add a task
    Add(AddCommand),
    /// Add several tasks in one request
    AddMany(AddManyCommand),
    /// Mark a task done or not done
    Toggle(ToggleCommand),
    /// Remove a task
    Delete(IdCommand),
    /// Show a task's fields as the edit dialog would
    Show(IdCommand),
    /// Update a task; omitted fields keep their current value
    Edit(EditCommand),
    /// Find tasks whose title contains a keyword
    Search(SearchCommand),
    /// Print the task list as HTML list items
    Html,
}

#[derive(Args, Debug)]
pub struct AddCommand {
    title: String,
}

#[derive(Args, Debug)]
pub struct AddManyCommand {
    #[arg(required = true)]
    titles: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ToggleCommand {
    id: u64,
    /// New completion state
    #[arg(action = ArgAction::Set)]
    completed: bool,
}

#[derive(Args, Debug)]
pub struct IdCommand {
    id: u64,
}

#[derive(Args, Debug)]
pub struct EditCommand {
    id: u64,

    /// New title; an empty string keeps the stored one
    #[arg(short, long)]
    title: Option<String>,

    /// New description; an empty string keeps the stored one
    #[arg(short, long)]
    description: Option<String>,

    #[arg(short, long)]
    completed: Option<bool>,
}

#[derive(Args, Debug)]
pub struct SearchCommand {
    keyword: String,
}

impl Command {
    /// Mutating commands load the list first so that a handler which skips
    /// its reload still leaves the current tasks in the model.
    pub fn execute<T: Transport>(self, page: &mut ChecklistPage<T>, out: &mut impl Write) -> eyre::Result<()> {
        match self {
            Self::List => page.load()?,
            Self::Add(o) => {
                page.validate_input(&o.title);
                if !page.model().add_enabled {
                    eyre::bail!("task title must not be blank");
                }
                page.load()?;
                page.add()?;
            }
            Self::AddMany(o) => {
                page.load()?;
                page.add_many(o.titles.as_slice())?;
            }
            Self::Toggle(o) => {
                page.load()?;
                page.toggle(o.id, o.completed)?;
            }
            Self::Delete(o) => {
                page.load()?;
                page.remove(o.id)?;
            }
            Self::Show(o) => {
                page.open_edit(o.id)?;
                let modal = &page.model().modal;
                writeln!(out, "id:          {}", o.id)?;
                writeln!(out, "title:       {}", modal.title)?;
                writeln!(out, "description: {}", modal.description)?;
                writeln!(out, "completed:   {}", modal.completed)?;
                page.close_modal();
                return Ok(());
            }
            Self::Edit(o) => {
                page.load()?;
                page.open_edit(o.id)?;
                let current = page.model().modal.clone();
                page.set_edit_form(
                    o.title.as_deref().unwrap_or(&current.title),
                    o.description.as_deref().unwrap_or(&current.description),
                    o.completed.unwrap_or(current.completed),
                );
                page.submit_edit()?;
            }
            Self::Search(o) => {
                let results = page.search(&o.keyword);
                write!(out, "{}", results.to_text())?;
                return Ok(());
            }
            Self::Html => {
                page.load()?;
                writeln!(out, "{}", view::render_checklist_html(&page.model().items))?;
                return Ok(());
            }
        };

        write!(out, "{}", view::render_checklist_text(&page.model().items))?;
        Ok(())
    }
}
