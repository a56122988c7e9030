use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::requests::types::{RequestStatus, Specialization};
use crate::roles::Role;

pub mod commands;

#[derive(Parser)]
#[command(name = "trainflow")]
#[command(about = "Role-based approval workflow for training requests")]
#[command(long_about = "Trainflow moves training requests from a requester through supervisor and \
                       program manager approval to the assigned trainer. Get started with \
                       'trainflow init' to create a data file with demo accounts.")]
pub struct Cli {
    /// Login code of the acting user
    #[arg(long = "as", global = true, value_name = "CODE", help = "Act as the user with this login code (e.g. DV001)")]
    pub user: Option<String>,
    /// Data file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH", help = "Path of the JSON data file")]
    pub data: Option<PathBuf>,
    /// Print machine readable JSON instead of text
    #[arg(long, global = true, help = "Emit JSON on stdout")]
    pub json: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data file with one demo account per role
    Init {
        /// Overwrite an existing data file
        #[arg(long, help = "Overwrite the data file if it already exists")]
        force: bool,
        /// Also write trainflow.toml pointing at the data file
        #[arg(long, help = "Write the effective configuration to trainflow.toml")]
        write_config: bool,
    },
    /// Start a new training request in draft (requesters only)
    New {
        /// Short title shown in listings
        #[arg(long)]
        title: String,
        /// Training date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Where the training takes place
        #[arg(long, default_value = "")]
        location: String,
        /// Specialization value or label
        #[arg(long)]
        specialization: Option<Specialization>,
        /// Number of trainees
        #[arg(long)]
        trainees: Option<u32>,
        /// Free text description
        #[arg(long)]
        description: Option<String>,
        /// Supervisor who should review the request
        #[arg(long)]
        supervisor: Option<String>,
        /// Program manager who should approve the request
        #[arg(long)]
        manager: Option<String>,
        /// Submit immediately after creating
        #[arg(long, help = "Submit the request for supervisor approval right away")]
        submit: bool,
    },
    /// Submit a draft for supervisor approval
    Submit { id: String },
    /// Approve a request waiting on your role
    Approve {
        id: String,
        /// Trainer to recommend (supervisors)
        #[arg(long)]
        trainer: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Reject a request waiting on your role
    Reject {
        id: String,
        #[arg(long)]
        note: Option<String>,
    },
    /// Mark an approved training as delivered (trainers)
    Complete {
        id: String,
        /// Documentation reference, repeatable
        #[arg(long = "doc")]
        docs: Vec<String>,
    },
    /// Show one request and what you can do with it
    Show { id: String },
    /// List the requests visible to you
    List {
        /// Only requests in this status
        #[arg(long)]
        status: Option<RequestStatus>,
    },
    /// Recommend trainers for a request, or browse the trainer directory
    Trainers {
        /// Request to recommend trainers for; the whole directory when omitted
        id: Option<String>,
        /// Match trainers by name, specialization or region
        #[arg(long, conflicts_with = "id")]
        search: Option<String>,
    },
    /// Show the wizard steps of a role
    Steps {
        /// Role code; all roles when omitted
        role: Option<Role>,
    },
}
