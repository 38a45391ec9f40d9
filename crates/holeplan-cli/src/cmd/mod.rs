pub mod analyze;
pub mod completions;
pub mod cycles;
pub mod order;
pub mod roadmap;

use std::path::{Path, PathBuf};

use clap::Args;
use holeplan_core::config::{ProjectConfig, resolve_config};
use holeplan_core::input::InputDocument;
use holeplan_triage::HoleAnalysis;
use holeplan_triage::HoleAnalyzer;
use holeplan_triage::extract::WholeWordMatcher;

use crate::output::{CliError, OutputMode, render_error};

/// Input selection shared by every analysis command.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// JSON document with `holes` and `relationships`; `-` reads stdin.
    #[arg(value_name = "INPUT", default_value = "-")]
    pub input: PathBuf,

    /// Match hole names in relationship text as whole words only.
    #[arg(long)]
    pub whole_word: bool,
}

/// Load and analyze the input named by `args`.
///
/// Input and config failures are rendered in `output` mode before the
/// error is returned.
pub fn load_analysis(
    args: &InputArgs,
    config_path: Option<&Path>,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<(HoleAnalysis, ProjectConfig)> {
    let config = match resolve_config(project_root, config_path) {
        Ok(config) => config,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            anyhow::bail!(err);
        }
    };

    let doc = match InputDocument::load(&args.input) {
        Ok(doc) => doc,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            anyhow::bail!(err);
        }
    };

    let analyzer = HoleAnalyzer::with_config(config.milestones);
    let analysis = if args.whole_word {
        analyzer
            .with_matcher(WholeWordMatcher)
            .analyze(&doc.holes, &doc.relationships)
    } else {
        analyzer.analyze(&doc.holes, &doc.relationships)
    };
    Ok((analysis, config))
}
