use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command line client for the device registry
#[derive(Parser, Debug)]
#[command(name = "regctl", author, version, long_about = None)]
#[command(about = "Manage users, nodes and regions of a regsvc instance")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct GlobalArgs {
    /// Address of regsvc [default: http://localhost]
    #[arg(long, global = true)]
    pub address: Option<String>,

    /// Port of regsvc [default: :8080]
    #[arg(long, global = true)]
    pub port: Option<String>,

    /// Config file holding address, port and timeout_secs
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add users, nodes or regions
    #[command(subcommand)]
    Add(AddCommand),

    /// Get a user or a node by id
    #[command(subcommand)]
    Get(GetCommand),

    /// List users, nodes or regions
    #[command(subcommand)]
    List(ListCommand),

    /// Delete a user or a node by id
    #[command(subcommand)]
    Delete(DeleteCommand),

    /// Update a user (group | region) or a node
    #[command(subcommand)]
    Update(UpdateCommand),

    /// Check a user's password
    Auth {
        #[arg(long)]
        id: String,
        #[arg(long)]
        password: String,
    },

    /// Registry database management
    Db(DbArgs),
}

#[derive(Subcommand, Debug)]
pub enum AddCommand {
    Users(AddUserArgs),
    Nodes(NodeArgs),
    Regions(AddRegionArgs),
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct AddUserArgs {
    /// User full name
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long)]
    pub email: String,
    #[arg(short, long)]
    pub password: String,
    /// Region id
    #[arg(short, long, default_value = "")]
    pub region: String,
}

/// Node fields; on update only the given ones change.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct NodeArgs {
    /// MAC address of the node
    #[arg(short = 'd', long = "adr", default_value = "")]
    pub addr: String,
    #[arg(short, long, default_value = "")]
    pub name: String,
    /// Region where the node is installed
    #[arg(short, long, default_value = "")]
    pub region: String,
    /// Latitude
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    pub lat: String,
    /// Longitude
    #[arg(short = 'g', long, default_value = "", allow_hyphen_values = true)]
    pub long: String,
    /// Master node id
    #[arg(short, long, default_value = "")]
    pub master: String,
    /// Node type: 1 sensor, 2 actuator, 3 controller
    #[arg(short = 't', long = "type")]
    pub node_type: Option<i64>,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct AddRegionArgs {
    #[arg(short, long)]
    pub id: String,
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long, default_value = "")]
    pub desc: String,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct IdArgs {
    #[arg(long)]
    pub id: String,
}

#[derive(Subcommand, Debug)]
pub enum GetCommand {
    Users(IdArgs),
    Nodes(IdArgs),
}

#[derive(Subcommand, Debug)]
pub enum ListCommand {
    Users,
    Nodes,
    Regions,
}

#[derive(Subcommand, Debug)]
pub enum DeleteCommand {
    Users(IdArgs),
    Nodes(IdArgs),
}

#[derive(Subcommand, Debug)]
pub enum UpdateCommand {
    /// e.g. regctl update users --id "uegeteg" -r "AB001" -g 1
    Users {
        #[arg(long)]
        id: String,
        /// New user group: 1 owner, 2 region admin, 3 region user
        #[arg(short, long)]
        group: Option<i64>,
        /// New region id
        #[arg(short, long)]
        region: Option<String>,
    },
    Nodes {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        changes: NodeArgs,
    },
}

#[derive(Args, Debug)]
pub struct DbArgs {
    #[command(flatten)]
    pub connection: DbConnectionArgs,

    #[command(subcommand)]
    pub action: DbAction,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct DbConnectionArgs {
    #[arg(long, global = true, default_value = "localhost")]
    pub hostname: String,
    #[arg(long, global = true, default_value = "postgres")]
    pub dbuser: String,
    #[arg(long, global = true, default_value = "postgres")]
    pub dbpass: String,
    #[arg(long, global = true, default_value = "postgres")]
    pub dbname: String,
    #[arg(long, global = true, default_value = "disable")]
    pub sslmode: String,
    #[arg(long, global = true, default_value_t = 5432)]
    pub dbport: u16,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum DbAction {
    /// Create the registry tables
    Init,
    /// Check the database is reachable
    Ping,
    /// Check the registry tables exist
    Test {
        #[arg(value_enum, default_value_t = DbTable::All)]
        table: DbTable,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbTable {
    All,
    Users,
    Nodes,
    Regions,
}

impl DbTable {
    pub fn names(&self) -> Vec<&'static str> {
        match self {
            DbTable::All => infrastructure::database::TABLES.to_vec(),
            DbTable::Users => vec!["users"],
            DbTable::Nodes => vec!["nodes"],
            DbTable::Regions => vec!["regions"],
        }
    }
}
