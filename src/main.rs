//! lexaid - AI legal assistant for your terminal.
//!
//! Each subcommand runs one flow: the input is validated, rendered into a
//! prompt, sent to the configured model backend, and the structured reply
//! is printed as formatted text or raw JSON.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lexaid::ai::{model_from_config, GenerativeModel};
use lexaid::core::{Config, DocumentPayload, RetryPolicy};
use lexaid::flows;

/// AI legal assistant for your terminal
#[derive(Parser)]
#[command(name = "lexaid")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print raw JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    /// Jurisdiction override for commands that use one
    #[arg(short = 'j', long, global = true)]
    jurisdiction: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a legal document for risks, clauses, and compliance
    Analyze {
        /// Document to analyze (PDF, text, or image)
        file: PathBuf,

        /// Regulation to check compliance against (repeatable)
        #[arg(short, long = "regulation")]
        regulations: Vec<String>,
    },

    /// Detect hidden junk fees in a rental lease
    JunkFees {
        /// Lease agreement to inspect
        file: PathBuf,

        /// Advertised monthly base rent
        #[arg(short, long)]
        base_rent: f64,
    },

    /// Draft a legal contract from a description
    Draft {
        /// Contract type (e.g. "NDA", "Lease Agreement")
        contract_type: String,

        /// Requirements: parties, key terms, dates, specific clauses
        #[arg(short, long)]
        details: String,
    },

    /// Estimate the cost of pursuing a legal case
    Costs {
        /// Description of the case
        description: String,

        /// Attorney experience level (junior, senior, partner)
        #[arg(short, long, default_value = "senior")]
        experience: String,
    },

    /// Get negotiation strategies for a contract
    Negotiate {
        /// Contract under negotiation
        file: PathBuf,

        /// Goals for the negotiation
        #[arg(short, long)]
        goals: String,
    },

    /// Research case law and statutes
    Caselaw {
        /// Legal topic or question to research
        query: String,
    },

    /// Ask a legal question, optionally grounded in a document
    Ask {
        /// The question
        question: String,

        /// Document to ground the answer in
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Compare two legal documents
    Compare {
        /// First document
        file_a: PathBuf,

        /// Second document
        file_b: PathBuf,
    },

    /// Run due diligence over a set of documents
    Diligence {
        /// Documents to review
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Transaction context (merger, acquisition, roles of the parties)
        #[arg(short, long)]
        transaction: String,
    },

    /// Analyze precedents and strategy for a case
    Precedents {
        /// Case details: facts and legal questions
        details: String,
    },

    /// Generate a step-by-step guide for a legal process
    Guide {
        /// The process (e.g. "filing a small claims case")
        topic: String,
    },

    /// Append an electronic signature block to a document
    Sign {
        /// Plain-text document to sign
        file: PathBuf,

        /// Full name of the signer
        #[arg(short, long)]
        signer: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// Show configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Write the current configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };
    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(filter).init();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "lexaid", &mut io::stdout());
            Ok(())
        }
        Commands::Config { path, init } => cmd_config(path, init),
        command => {
            let session = Session::new(cli.jurisdiction)?;
            session.dispatch(command, cli.json)
        }
    }
}

/// One CLI invocation: loaded config, selected backend, and a runtime.
struct Session {
    config: Config,
    model: Box<dyn GenerativeModel>,
    jurisdiction: String,
    rt: tokio::runtime::Runtime,
}

impl Session {
    fn new(jurisdiction_override: Option<String>) -> Result<Self> {
        let config = Config::load().context("failed to load configuration")?;
        let model = model_from_config(&config.ai)?;
        let jurisdiction =
            jurisdiction_override.unwrap_or_else(|| config.general.default_jurisdiction.clone());
        let rt = tokio::runtime::Runtime::new()?;
        Ok(Self { config, model, jurisdiction, rt })
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.config.retry.max_attempts)
    }

    fn dispatch(&self, command: Commands, json: bool) -> Result<()> {
        match command {
            Commands::Analyze { file, regulations } => {
                let input = flows::AnalyzeDocumentInput {
                    document: load_document(&file)?,
                    regulations,
                };
                let output = self.rt.block_on(flows::analyze_document(self.model.as_ref(), &input))?;
                emit(json, &output, print_analysis)
            }
            Commands::JunkFees { file, base_rent } => {
                let input = flows::DetectJunkFeesInput { lease: load_document(&file)?, base_rent };
                let output = self.rt.block_on(flows::detect_junk_fees(self.model.as_ref(), &input))?;
                emit(json, &output, print_junk_fees)
            }
            Commands::Draft { contract_type, details } => {
                let input = flows::GenerateContractInput { contract_type, details };
                let policy = self.retry_policy();
                let output = self
                    .rt
                    .block_on(flows::generate_contract(self.model.as_ref(), &policy, &input))?;
                emit(json, &output, |o| println!("{}", o.contract_text))
            }
            Commands::Costs { description, experience } => {
                let attorney_experience = experience
                    .parse::<flows::AttorneyExperience>()
                    .map_err(|e| anyhow::anyhow!(e))?;
                let input = flows::EstimateCostsInput {
                    case_description: description,
                    jurisdiction: self.jurisdiction.clone(),
                    attorney_experience,
                };
                let output = self.rt.block_on(flows::estimate_costs(self.model.as_ref(), &input))?;
                emit(json, &output, print_costs)
            }
            Commands::Negotiate { file, goals } => {
                let input = flows::NegotiateContractInput {
                    contract: load_document(&file)?,
                    negotiation_goals: goals,
                };
                let output =
                    self.rt.block_on(flows::negotiate_contract(self.model.as_ref(), &input))?;
                emit(json, &output, |o| println!("{}", o.negotiation_strategies))
            }
            Commands::Caselaw { query } => {
                let input = flows::SearchCaseLawInput {
                    query,
                    jurisdiction: self.jurisdiction.clone(),
                };
                let output = self.rt.block_on(flows::search_case_law(self.model.as_ref(), &input))?;
                emit(json, &output, print_caselaw)
            }
            Commands::Ask { question, file } => {
                let document = file.as_deref().map(load_document).transpose()?;
                let input = flows::AnswerQuestionInput { question, document };
                let output = self.rt.block_on(flows::answer_question(self.model.as_ref(), &input))?;
                emit(json, &output, |o| println!("{}", o.answer))
            }
            Commands::Compare { file_a, file_b } => {
                let input = flows::CompareDocumentsInput {
                    document_a: load_document(&file_a)?,
                    document_b: load_document(&file_b)?,
                };
                let output =
                    self.rt.block_on(flows::compare_documents(self.model.as_ref(), &input))?;
                emit(json, &output, |o| println!("{}", o.comparison_summary))
            }
            Commands::Diligence { files, transaction } => {
                let documents = files
                    .iter()
                    .map(|file| load_document(file))
                    .collect::<Result<Vec<_>>>()?;
                let input = flows::DueDiligenceInput {
                    documents,
                    transaction_details: transaction,
                };
                let output =
                    self.rt.block_on(flows::perform_due_diligence(self.model.as_ref(), &input))?;
                emit(json, &output, print_diligence)
            }
            Commands::Precedents { details } => {
                let input = flows::AnalyzePrecedentsInput {
                    case_details: details,
                    jurisdiction: self.jurisdiction.clone(),
                };
                let output =
                    self.rt.block_on(flows::analyze_precedents(self.model.as_ref(), &input))?;
                emit(json, &output, print_precedents)
            }
            Commands::Guide { topic } => {
                let input = flows::GenerateWorkflowInput {
                    topic,
                    jurisdiction: self.jurisdiction.clone(),
                };
                let policy = self.retry_policy();
                let output = self
                    .rt
                    .block_on(flows::generate_workflow(self.model.as_ref(), &policy, &input))?;
                emit(json, &output, print_guide)
            }
            Commands::Sign { file, signer } => {
                let document_content = std::fs::read_to_string(&file)
                    .with_context(|| format!("failed to read {}", file.display()))?;
                let signing_date = chrono::Local::now().format("%B %-d, %Y").to_string();
                let input = flows::SignDocumentInput {
                    document_content,
                    signer_name: signer,
                    signing_date,
                };
                let output = self.rt.block_on(flows::sign_document(self.model.as_ref(), &input))?;
                emit(json, &output, |o| println!("{}", o.signed_document_content))
            }
            Commands::Completions { .. } | Commands::Config { .. } => unreachable!(),
        }
    }
}

fn load_document(path: &Path) -> Result<DocumentPayload> {
    DocumentPayload::load(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Print the output as JSON or hand it to the text renderer.
fn emit<T: Serialize>(json: bool, output: &T, render: impl FnOnce(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(output)?);
    } else {
        render(output);
    }
    Ok(())
}

fn cmd_config(path_only: bool, init: bool) -> Result<()> {
    if path_only {
        match Config::path() {
            Some(path) => println!("{}", path.display()),
            None => println!("(no config directory available)"),
        }
        return Ok(());
    }
    let config = Config::load()?;
    if init {
        config.save().context("failed to write config file")?;
        if let Some(path) = Config::path() {
            println!("wrote {}", path.display());
        }
        return Ok(());
    }
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn print_analysis(output: &flows::AnalyzeDocumentOutput) {
    println!("Summary\n-------\n{}\n", output.summary);

    if !output.key_terms.is_empty() {
        println!("Key Terms\n---------");
        for term in &output.key_terms {
            println!("  - {term}");
        }
        println!();
    }

    if !output.potential_risks.is_empty() {
        println!("Potential Risks\n---------------");
        for risk in &output.potential_risks {
            println!("  [{}] {}", risk.severity, risk.risk);
            println!("        fix: {}", risk.recommendation);
        }
        println!();
    }

    println!("Clause Analysis\n---------------");
    for clause in &output.clause_analysis {
        if clause.is_present {
            println!("  [{}] {} - {}", clause.risk_level, clause.clause_type, clause.explanation);
        } else {
            println!("  [ - ] {} (not present)", clause.clause_type);
        }
    }

    if let Some(compliance) = &output.compliance_analysis {
        println!("\nCompliance\n----------");
        for finding in compliance {
            let status = if finding.is_compliant { "PASS" } else { "FAIL" };
            println!("  [{status}] {}: {}", finding.regulation, finding.reasoning);
        }
    }
}

fn print_junk_fees(output: &flows::DetectJunkFeesOutput) {
    if output.identified_fees.is_empty() {
        println!("No junk fees identified.");
    } else {
        println!("Identified Fees\n---------------");
        for fee in &output.identified_fees {
            println!("  ${:.2}  {} - {}", fee.amount, fee.fee_name, fee.description);
        }
    }
    println!("\nTrue total monthly cost: ${:.2}", output.true_total_monthly_cost);
    println!("\n{}", output.summary);
}

fn print_costs(output: &flows::EstimateCostsOutput) {
    println!("Estimated cost: {}\n", output.estimated_cost_range);
    println!("Breakdown\n---------");
    for item in &output.cost_breakdown {
        println!("  {}  {} - {}", item.cost, item.item, item.description);
    }
    println!("\n{}", output.disclaimer);
}

fn print_caselaw(output: &flows::SearchCaseLawOutput) {
    println!("{}\n", output.summary);

    if !output.case_law.is_empty() {
        println!("Case Law\n--------");
        for case in &output.case_law {
            println!("  {} ({})", case.title, case.citation);
            println!("    {}", case.summary);
        }
        println!();
    }

    if !output.statutes.is_empty() {
        println!("Statutes\n--------");
        for statute in &output.statutes {
            println!("  {} ({})", statute.title, statute.code);
            println!("    {}", statute.summary);
        }
    }
}

fn print_diligence(output: &flows::DueDiligenceOutput) {
    println!("Executive Summary\n-----------------\n{}\n", output.executive_summary);
    println!("Key Findings\n------------");
    for finding in &output.key_findings {
        println!("  [{}] {}: {}", finding.risk_level, finding.area, finding.finding);
        println!("        fix: {}", finding.recommendation);
    }
}

fn print_precedents(output: &flows::AnalyzePrecedentsOutput) {
    println!("{}\n", output.summary);

    if !output.precedents.is_empty() {
        println!("Precedents\n----------");
        for precedent in &output.precedents {
            println!("  {} ({})", precedent.title, precedent.citation);
            println!("    relevance: {}", precedent.relevance);
            println!("    outcome:   {}", precedent.outcome);
        }
        println!();
    }

    println!("Case Strategy\n-------------\n{}\n", output.case_strategy);

    if !output.arrest_prevention_measures.is_empty() {
        println!("Arrest Prevention\n-----------------");
        for measure in &output.arrest_prevention_measures {
            println!("  - {measure}");
        }
        println!();
    }

    if !output.rights_during_arrest.is_empty() {
        println!("Rights During Arrest\n--------------------");
        for right in &output.rights_during_arrest {
            println!("  - {right}");
        }
    }
}

fn print_guide(output: &flows::GenerateWorkflowOutput) {
    println!("{}\n{}\n", output.workflow_title, "=".repeat(output.workflow_title.len()));
    for (index, step) in output.steps.iter().enumerate() {
        println!("{}. {}\n   {}\n", index + 1, step.title, step.content);
    }
    if let Some(searches) = &output.suggested_youtube_searches {
        println!("Video searches worth trying:");
        for search in searches {
            println!("  - {search}");
        }
    }
}
