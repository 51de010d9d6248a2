/*
[INPUT]:  Parsed subcommands and a ResourceApi implementation
[OUTPUT]: Headless list, start, watch and stop operations on stdout
[POS]:    CLI command layer
[UPDATE]: When adding subcommands
*/

pub mod interactive;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Subcommand;
use console::style;
use tokio_util::sync::CancellationToken;
use tracing::info;

use interceptor_adapter::ResourceApi;
use interceptor_console::form::ModuleForm;
use interceptor_console::sync::{Poller, TASK_POLL_INTERVAL, TaskOutputWriter};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive terminal console (default)
    Tui,
    /// List available modules
    Modules,
    /// List tasks
    Tasks,
    /// List discovered hosts
    Hosts,
    /// List discovered services
    Services,
    /// List captured credentials
    Credentials,
    /// Show a module and its arguments
    Show { module: String },
    /// Start a module and print the created task name
    Start {
        module: String,
        /// Argument override, repeatable
        #[arg(long = "arg", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        args: Vec<(String, String)>,
        /// Prompt for every argument
        #[arg(long)]
        interactive: bool,
    },
    /// Follow the output of a task until it stops
    Watch { task: String },
    /// Stop a running task
    Stop { task: String },
    /// Clear hosts, services and credentials
    DbReset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    if name.trim().is_empty() {
        return Err(format!("missing argument name in `{raw}`"));
    }
    Ok((name.trim().to_string(), value.to_string()))
}

pub async fn run_command(
    command: Command,
    api: Arc<dyn ResourceApi>,
    shutdown: CancellationToken,
) -> Result<()> {
    match command {
        Command::Tui => Err(anyhow!("tui is handled by the binary entry point")),
        Command::Modules => {
            for module in api.list_modules().await.context("list modules")? {
                println!("{}", module.name);
            }
            Ok(())
        }
        Command::Tasks => {
            for task in api.list_tasks().await.context("list tasks")? {
                println!("{}", task.name);
            }
            Ok(())
        }
        Command::Hosts => {
            for host in api.list_hosts().await.context("list hosts")? {
                println!("{}\t{}", host.id, host.label());
            }
            Ok(())
        }
        Command::Services => {
            for service in api.list_services().await.context("list services")? {
                println!(
                    "{}\t{}\t{}/{}\t{}",
                    service.id,
                    service.host_id,
                    service.port.map(|port| port.to_string()).unwrap_or_else(|| "-".to_string()),
                    service.transport_protocol.as_deref().unwrap_or("-"),
                    service.service.as_deref().unwrap_or(""),
                );
            }
            Ok(())
        }
        Command::Credentials => {
            for credential in api.list_credentials().await.context("list credentials")? {
                println!(
                    "{}\t{}\t{}\t{}",
                    credential.id,
                    credential.service_id,
                    credential.login_name.as_deref().unwrap_or("-"),
                    credential.credential.as_deref().unwrap_or("-"),
                );
            }
            Ok(())
        }
        Command::Show { module } => show_module(api.as_ref(), &module).await,
        Command::Start {
            module,
            args,
            interactive,
        } => start_module(api.as_ref(), &module, &args, interactive).await,
        Command::Watch { task } => watch_task(api, &task, shutdown).await,
        Command::Stop { task } => {
            api.stop_task(&task)
                .await
                .with_context(|| format!("stop task {task}"))?;
            println!("Stop requested: {task}");
            Ok(())
        }
        Command::DbReset { yes } => {
            if !yes {
                let confirmed = dialoguer::Confirm::with_theme(
                    &dialoguer::theme::ColorfulTheme::default(),
                )
                .with_prompt("Delete all hosts, services and credentials?")
                .default(false)
                .interact()?;
                if !confirmed {
                    println!("{}", style("Aborted.").yellow());
                    return Ok(());
                }
            }
            api.reset_database().await.context("reset database")?;
            println!("Database reset");
            Ok(())
        }
    }
}

async fn load_form(api: &dyn ResourceApi, module: &str) -> Result<ModuleForm> {
    let module = api
        .get_module(module)
        .await
        .with_context(|| format!("load module {module}"))?;
    let mut form = ModuleForm::build(module);
    form.resolve_interfaces(api).await;
    Ok(form)
}

async fn show_module(api: &dyn ResourceApi, module: &str) -> Result<()> {
    let form = load_form(api, module).await?;
    println!("{}", style(form.module()).bold().cyan());
    if !form.description().is_empty() {
        println!("{}", form.description());
    }
    for widget in form.widgets() {
        let required = if widget.is_required() { " (required)" } else { "" };
        println!(
            "  {} [{}]{required}: {}",
            widget.name(),
            widget.type_name(),
            widget.display_value()
        );
    }
    Ok(())
}

async fn start_module(
    api: &dyn ResourceApi,
    module: &str,
    overrides: &[(String, String)],
    interactive: bool,
) -> Result<()> {
    let mut form = load_form(api, module).await?;
    form.apply_overrides(
        overrides
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str())),
    )?;
    if interactive {
        interactive::prompt_arguments(&mut form)?;
    }

    let submission = form.submission()?;
    info!(module = %submission.module, arguments = submission.args.len(), "starting module");
    let task = api
        .start_module(&submission.module, &submission.args)
        .await
        .with_context(|| format!("start module {module}"))?;
    println!("New task created: {task}");
    Ok(())
}

async fn watch_task(api: Arc<dyn ResourceApi>, task: &str, shutdown: CancellationToken) -> Result<()> {
    let name = task.to_string();
    let mut handle = Poller::start(
        format!("watch:{task}"),
        TASK_POLL_INTERVAL,
        move || {
            let api = api.clone();
            let name = name.clone();
            async move { api.get_task(&name).await }
        },
        TaskOutputWriter::new(task, io::stdout()),
    );

    tokio::select! {
        _ = handle.join() => {}
        _ = shutdown.cancelled() => {
            handle.cancel();
            info!(task = %task, "stopped watching");
        }
    }
    Ok(())
}
