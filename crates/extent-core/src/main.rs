use anyhow::{bail, Context};
use async_trait::async_trait;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use extent_bridge::{DrawSurface, DrawToolEvent, ToolMode};
use extent_core::{
    init_tracing, ComponentEditor, ComponentStore, EditorConfig, EditorError, PersistenceError,
};
use extent_feature::Feature;
use extent_payload::{InsertComponentPayload, UpdateComponentPayload};
use extent_session::DraftComponent;
use serde::Deserialize;
use std::path::PathBuf;

/// Recorded editing session
#[derive(Debug, Deserialize)]
struct ReplayScript {
    /// Present when replaying an edit of a persisted component
    #[serde(default)]
    project_component_id: Option<i64>,
    /// Starting draft (persisted features for edits)
    draft: DraftComponent,
    /// Surface events in order
    #[serde(default)]
    events: Vec<DrawToolEvent>,
}

/// Prints payloads instead of storing them
struct DryRunStore {
    json: bool,
}

impl DryRunStore {
    fn print<T: serde::Serialize>(&self, payload: &T) -> Result<(), PersistenceError> {
        let text = if self.json {
            serde_json::to_string(payload)
        } else {
            serde_json::to_string_pretty(payload)
        }
        .map_err(|e| PersistenceError::Rejected(e.to_string()))?;
        println!("{text}");
        Ok(())
    }
}

#[async_trait]
impl ComponentStore for DryRunStore {
    async fn insert_component(
        &self,
        payload: &InsertComponentPayload,
    ) -> Result<i64, PersistenceError> {
        self.print(payload)?;
        Ok(0)
    }

    async fn update_component(
        &self,
        payload: &UpdateComponentPayload,
    ) -> Result<(), PersistenceError> {
        self.print(payload)
    }
}

/// Logs what the editor pushes to the surface
struct TraceSurface;

impl DrawSurface for TraceSurface {
    fn set_features(&mut self, features: &[Feature]) {
        tracing::info!(count = features.len(), "surface features replaced");
    }

    fn change_mode(&mut self, mode: &ToolMode) {
        tracing::info!(%mode, "surface mode changed");
    }
}

/// Load the editor config, apply command-line overrides and install tracing
fn load_config(matches: &ArgMatches) -> Result<EditorConfig, EditorError> {
    let config = load_config(&matches)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Command::new("extent-replay")
        .version(extent_core::VERSION)
        .about("Replay a recorded drawing session and print the payload it saves")
        .arg(
            Arg::new("script")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("JSON script: { project_component_id?, draft, events }"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .help("Editor config (TOML)"),
        )
        .arg(
            Arg::new("project-id")
                .long("project-id")
                .value_parser(value_parser!(i64))
                .help("Project for new components, overrides the config"),
        )
        .arg(
            Arg::new("compact")
                .long("compact")
                .action(ArgAction::SetTrue)
                .help("Print the payload on one line"),
        );

    let matches = cli.get_matches();

    let config = load_config(&matches)?;

    let Some(script_path) = matches.get_one::<PathBuf>("script") else {
        bail!("missing script path");
    };
    let text = std::fs::read_to_string(script_path)
        .with_context(|| format!("reading {}", script_path.display()))?;
    let script: ReplayScript =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", script_path.display()))?;

    let store = DryRunStore {
        json: matches.get_flag("compact"),
    };
    let mut editor = ComponentEditor::new(config, store, TraceSurface);
    match script.project_component_id {
        Some(id) => editor.start_edit(id, script.draft),
        None => editor.start_create(script.draft),
    }

    let total = script.events.len();
    for event in script.events {
        editor.handle_tool_event(event);
    }
    tracing::info!(
        events = total,
        features = editor.session().features().len(),
        "replay finished"
    );

    let outcome = editor.save().await.context("saving replayed draft")?;
    tracing::info!(?outcome, "dry run complete");
    Ok(())
}
