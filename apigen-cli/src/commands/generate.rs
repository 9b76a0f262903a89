//! Project generation command

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;

use apigen::{Generator, ProjectRequest, TemplateSource};

/// Template archive downloaded when no other source is given.
const DEFAULT_TEMPLATE_URL: &str =
    "https://github.com/apigen-dev/apigen/raw/main/templates/template.zip";

/// Generate a starter API project
pub struct GenerateCommand {
    request: ProjectRequest,
}

impl GenerateCommand {
    /// Build the request from the parsed CLI flags.
    ///
    /// # Errors
    ///
    /// Fails when the project name is missing or blank; deeper name
    /// validation happens in the engine.
    pub fn new(
        name: String,
        template_url: Option<String>,
        from_dir: Option<PathBuf>,
        skeleton: bool,
    ) -> Result<Self> {
        if name.trim().is_empty() {
            anyhow::bail!("please provide a project name using the -n flag");
        }

        let source = if skeleton {
            TemplateSource::Skeleton
        } else if let Some(path) = from_dir {
            TemplateSource::LocalTree { path }
        } else {
            TemplateSource::RemoteArchive {
                url: template_url.unwrap_or_else(|| DEFAULT_TEMPLATE_URL.to_string()),
            }
        };

        Ok(Self {
            request: ProjectRequest { name, source },
        })
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Surfaces the engine's phase-wrapped failure; the partially populated
    /// target directory (if any) is named in the message and left on disk.
    pub async fn execute(&self, cancel: &CancellationToken) -> Result<()> {
        println!(
            "{} {} {}",
            style("Creating").green().bold(),
            style("starter API project:").bold(),
            style(&self.request.name).cyan().bold()
        );
        println!();

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Failed to set progress style")?,
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner.set_message(match &self.request.source {
            TemplateSource::RemoteArchive { .. } => "Downloading template archive...",
            TemplateSource::LocalTree { .. } => "Copying template directory...",
            TemplateSource::Skeleton => "Creating project structure...",
        });

        let generator = Generator::new().context("Failed to resolve working directory")?;
        let report = generator.run(&self.request, cancel).await;

        spinner.finish_and_clear();

        match report.outcome {
            Ok(()) => {
                self.print_success(report.target_path.as_deref());
                Ok(())
            }
            Err(e) => {
                if let Some(target) = report.target_path {
                    eprintln!(
                        "{} partially populated directory left at {}",
                        style("note:").yellow().bold(),
                        style(target.display()).cyan()
                    );
                }
                Err(e.into())
            }
        }
    }

    /// Print success message with next steps
    fn print_success(&self, target: Option<&Path>) {
        println!("{}", style("✓ Project created successfully!").green().bold());
        if let Some(target) = target {
            println!("  {}", style(target.display()).cyan());
        }
        println!();
        println!("{}", style("Next steps:").bold());
        println!();
        println!("  {} Navigate to project:", style("1.").cyan());
        println!(
            "     {} {}",
            style("$").dim(),
            style(format!("cd {}", self.request.name)).cyan()
        );
        println!();
        println!("  {} Initialize the module:", style("2.").cyan());
        println!(
            "     {} {}",
            style("$").dim(),
            style(format!("go mod init {}", self.request.name)).cyan()
        );
        println!("     {} {}", style("$").dim(), style("go mod tidy").cyan());
        println!();
        println!("  {} Run the server:", style("3.").cyan());
        println!(
            "     {} {}",
            style("$").dim(),
            style("go run ./cmd").cyan()
        );
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_is_rejected() {
        assert!(GenerateCommand::new(String::new(), None, None, false).is_err());
        assert!(GenerateCommand::new("   ".to_string(), None, None, false).is_err());
    }

    #[test]
    fn test_default_source_is_remote_archive() {
        let cmd = GenerateCommand::new("myapi".to_string(), None, None, false).unwrap();
        assert!(matches!(
            cmd.request.source,
            TemplateSource::RemoteArchive { ref url } if url == DEFAULT_TEMPLATE_URL
        ));
    }

    #[test]
    fn test_template_url_overrides_default() {
        let cmd = GenerateCommand::new(
            "myapi".to_string(),
            Some("https://example.com/t.zip".to_string()),
            None,
            false,
        )
        .unwrap();
        assert!(matches!(
            cmd.request.source,
            TemplateSource::RemoteArchive { ref url } if url == "https://example.com/t.zip"
        ));
    }

    #[test]
    fn test_skeleton_flag_selects_skeleton() {
        let cmd = GenerateCommand::new("myapi".to_string(), None, None, true).unwrap();
        assert!(matches!(cmd.request.source, TemplateSource::Skeleton));
    }

    #[test]
    fn test_from_dir_selects_local_tree() {
        let cmd = GenerateCommand::new(
            "myapi".to_string(),
            None,
            Some(PathBuf::from("/tmp/template")),
            false,
        )
        .unwrap();
        assert!(matches!(
            cmd.request.source,
            TemplateSource::LocalTree { ref path } if path == Path::new("/tmp/template")
        ));
    }
}
