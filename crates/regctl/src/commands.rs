use anyhow::{Result, bail};
use application::Endpoints;
use domain::{Node, NodeType, Region, User, UserGroup};
use infrastructure::DatabaseConfig;
use migration::{Migrator, MigratorTrait};
use sea_orm::SqlxPostgresConnector;
use std::io::Write;
use tracing::debug;

use crate::cli::{
    AddCommand, Cli, Command, DbAction, DbArgs, DeleteCommand, GetCommand, ListCommand, NodeArgs,
    UpdateCommand,
};
use crate::config::CliConfig;
use crate::output;

/// Run one regctl invocation, writing results to `out`.
pub async fn execute(cli: Cli, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Command::Db(args) => run_db(args, out).await,
        command => {
            let config = CliConfig::load(&cli.global)?;
            debug!(instance = %config.instance(), "using registry");
            let endpoints = config.endpoints()?;
            run_remote(command, &endpoints, out).await
        }
    }
}

async fn run_remote(command: Command, endpoints: &Endpoints, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Add(AddCommand::Users(args)) => {
            let user = User {
                name: args.name,
                email: args.email,
                password: args.password,
                region: args.region,
                ..Default::default()
            };
            endpoints.add_user(user).await?;
            output::created(out, "new user successfully created")
        }
        Command::Add(AddCommand::Nodes(args)) => {
            endpoints.add_node(node_from(args)).await?;
            output::created(out, "new node successfully created")
        }
        Command::Add(AddCommand::Regions(args)) => {
            let region = Region::new(args.id, args.name, args.desc);
            endpoints.add_region(region).await?;
            output::created(out, "new region added")
        }
        Command::Get(GetCommand::Users(args)) => {
            let user = endpoints.get_user(&args.id).await?;
            output::json(out, &user)
        }
        Command::Get(GetCommand::Nodes(args)) => {
            let node = endpoints.get_node(&args.id).await?;
            output::json(out, &node)
        }
        Command::List(ListCommand::Users) => output::json(out, &endpoints.list_users().await?),
        Command::List(ListCommand::Nodes) => output::json(out, &endpoints.list_nodes().await?),
        Command::List(ListCommand::Regions) => {
            output::json(out, &endpoints.list_regions().await?)
        }
        Command::Delete(DeleteCommand::Users(args)) => {
            endpoints.delete_user(&args.id).await?;
            output::ok(out)
        }
        Command::Delete(DeleteCommand::Nodes(args)) => {
            endpoints.delete_node(&args.id).await?;
            output::ok(out)
        }
        Command::Update(UpdateCommand::Users { id, group, region }) => {
            if group.is_none() && region.is_none() {
                bail!("nothing to update, pass --group and/or --region");
            }
            let changes = User {
                group: group.and_then(UserGroup::from_code),
                region: region.unwrap_or_default(),
                ..Default::default()
            };
            let user = endpoints.update_user(&id, changes).await?;
            output::json(out, &user)
        }
        Command::Update(UpdateCommand::Nodes { id, changes }) => {
            let node = endpoints.update_node(&id, node_from(changes)).await?;
            output::json(out, &node)
        }
        Command::Auth { id, password } => {
            endpoints.auth_user(&id, &password).await?;
            output::ok(out)
        }
        Command::Db(args) => run_db(args, out).await,
    }
}

fn node_from(args: NodeArgs) -> Node {
    Node {
        addr: args.addr,
        name: args.name,
        node_type: args.node_type.and_then(NodeType::from_code),
        region: args.region,
        lat: args.lat,
        long: args.long,
        master: args.master,
        ..Default::default()
    }
}

async fn run_db(args: DbArgs, out: &mut dyn Write) -> Result<()> {
    let config = DatabaseConfig::from(&args.connection);
    let pool = infrastructure::database::connect(&config).await?;

    match args.action {
        DbAction::Ping => output::ok(out),
        DbAction::Init => {
            let connection = SqlxPostgresConnector::from_sqlx_postgres_pool(pool);
            Migrator::up(&connection, None).await?;
            output::ok(out)
        }
        DbAction::Test { table } => {
            let mut missing = Vec::new();
            for name in table.names() {
                if infrastructure::database::table_exists(&pool, name).await? {
                    writeln!(out, "{}: ok", name)?;
                } else {
                    writeln!(out, "{}: missing", name)?;
                    missing.push(name);
                }
            }
            if !missing.is_empty() {
                bail!("missing tables: {}, run `regctl db init`", missing.join(", "));
            }
            Ok(())
        }
    }
}
