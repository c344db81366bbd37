//! Command handlers and the `plan` argument wrapper.
//!
//! Trip arguments are parsed by clap into [`PlanArgs`] and turned into a
//! sequence of core [`TripEdit`]s, so the CLI edits the draft the same way an
//! interactive form would and the core decides what is valid.

use std::fmt::Write as _;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use jiff::civil::Date;
use log::{error, info};
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use wayfarer_core::{
    catalog,
    display::{GeneratedItinerary, OperationStatus, StoredItinerary, Transcript},
    ChatFlow, ChatHandoff, ChatState, ErrorKind, TravelClass, TravelClient, TravelError,
    TripEdit,
};

use crate::renderer::TerminalRenderer;

/// Generate an itinerary for a trip
///
/// Dates use the YYYY-MM-DD format. Interests and regions must come from the
/// catalogue listed by `wf options`; repeat the flag to pick several.
#[derive(Args)]
pub struct PlanArgs {
    #[arg(short, long, help = "Origin airport or country code, e.g. LHR")]
    pub origin: Option<String>,
    #[arg(long, help = "Destination country code [default: IE]")]
    pub destination: Option<String>,
    #[arg(short, long, help = "First day in Ireland (YYYY-MM-DD)")]
    pub arrival: Option<Date>,
    #[arg(short, long, help = "Last day in Ireland (YYYY-MM-DD)")]
    pub departure: Option<Date>,
    #[arg(long, help = "Number of adults [default: 1]")]
    pub adults: Option<u8>,
    #[arg(long, help = "Number of children [default: 0]")]
    pub children: Option<u8>,
    #[arg(
        long = "class",
        help = "Travel class: economy, premium-economy, business or first"
    )]
    pub travel_class: Option<TravelClass>,
    #[arg(short, long, help = "Budget in whole euros")]
    pub budget: Option<u32>,
    #[arg(short, long = "interest", help = "Interest to plan around (repeatable)")]
    pub interests: Vec<String>,
    #[arg(short, long = "region", help = "County to include (repeatable)")]
    pub regions: Vec<String>,
    #[arg(long = "dietary", help = "Dietary restriction (repeatable)")]
    pub dietary_restrictions: Vec<String>,
    #[arg(long, help = "Anything else the planner should know")]
    pub special_requests: Option<String>,
    #[arg(long, help = "Preferred accommodation, e.g. hotel or b&b")]
    pub accommodation: Option<String>,
    #[arg(long, help = "Preferred transport, e.g. rental car")]
    pub transport: Option<String>,
    #[arg(long, help = "Plan for accessibility needs")]
    pub accessibility: bool,
    #[arg(long, help = "Continue into a chat about the new itinerary")]
    pub chat: bool,
}

impl PlanArgs {
    /// Field updates in the order a form would apply them.
    pub fn into_edits(self) -> Vec<TripEdit> {
        let mut edits = Vec::new();
        if let Some(origin) = self.origin {
            edits.push(TripEdit::Origin(origin));
        }
        if let Some(destination) = self.destination {
            edits.push(TripEdit::Destination(destination));
        }
        if let Some(arrival) = self.arrival {
            edits.push(TripEdit::ArrivalDate(Some(arrival)));
        }
        if let Some(departure) = self.departure {
            edits.push(TripEdit::DepartureDate(Some(departure)));
        }
        if let Some(adults) = self.adults {
            edits.push(TripEdit::Adults(adults));
        }
        if let Some(children) = self.children {
            edits.push(TripEdit::Children(children));
        }
        if let Some(class) = self.travel_class {
            edits.push(TripEdit::TravelClass(class));
        }
        if let Some(budget) = self.budget {
            edits.push(TripEdit::Budget(Some(budget)));
        }
        edits.extend(self.interests.into_iter().map(TripEdit::AddInterest));
        edits.extend(self.regions.into_iter().map(TripEdit::AddRegion));
        edits.extend(
            self.dietary_restrictions
                .into_iter()
                .map(TripEdit::AddDietaryRestriction),
        );
        if self.special_requests.is_some() {
            edits.push(TripEdit::SpecialRequests(self.special_requests));
        }
        if self.accommodation.is_some() {
            edits.push(TripEdit::AccommodationType(self.accommodation));
        }
        if self.transport.is_some() {
            edits.push(TripEdit::Transportation(self.transport));
        }
        if self.accessibility {
            edits.push(TripEdit::AccessibilityNeeds(true));
        }
        edits
    }
}

/// Lists the catalogues the trip form offers.
pub fn show_options(renderer: &TerminalRenderer) -> Result<()> {
    let mut output = String::new();

    writeln!(output, "## Interests")?;
    writeln!(output)?;
    for interest in catalog::INTERESTS {
        writeln!(output, "- {interest}")?;
    }

    writeln!(output)?;
    writeln!(output, "## Regions")?;
    writeln!(output)?;
    for region in catalog::REGIONS {
        writeln!(output, "- {region}")?;
    }

    writeln!(output)?;
    writeln!(output, "## Origin airports")?;
    writeln!(output)?;
    for airport in catalog::ORIGIN_AIRPORTS {
        writeln!(output, "- {airport}")?;
    }

    writeln!(output)?;
    writeln!(output, "## Travel classes")?;
    writeln!(output)?;
    for class in TravelClass::ALL {
        writeln!(output, "- {} ({})", class, class.as_str())?;
    }

    renderer.render(&output)
}

/// Command handlers sharing one client and renderer.
pub struct Cli {
    client: TravelClient,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(client: TravelClient, renderer: TerminalRenderer) -> Self {
        Self { client, renderer }
    }

    pub async fn plan(&self, args: PlanArgs) -> Result<()> {
        let chat_after = args.chat;
        let planner = self.client.planner();

        for edit in args.into_edits() {
            if let Err(e) = planner.edit(edit) {
                return self.fail("Invalid trip details", e);
            }
        }

        info!("Requesting itinerary");
        match planner.submit_draft().await {
            Ok(handoff) => {
                let output = GeneratedItinerary::new(&handoff.result)
                    .with_request(handoff.request.as_ref())
                    .to_string();
                self.renderer.render(&output)?;
                if chat_after {
                    self.chat(Some(handoff), None).await
                } else {
                    Ok(())
                }
            }
            Err(e) => self.fail("Failed to generate itinerary", e),
        }
    }

    pub async fn chat(&self, handoff: Option<ChatHandoff>, message: Option<String>) -> Result<()> {
        let chat = self
            .client
            .chat(handoff)
            .await
            .context("Failed to open chat")?;

        if chat.state() == ChatState::NoItinerary {
            let status = OperationStatus::failure(TravelError::NoItinerary.to_string());
            return self.renderer.render(&status.to_string());
        }

        match message {
            Some(message) => self.send(&chat, &message).await,
            None => self.repl(&chat).await,
        }
    }

    async fn repl(&self, chat: &ChatFlow) -> Result<()> {
        self.renderer
            .render(&Transcript(chat.transcript()).to_string())?;
        self.renderer
            .render("_Type a message, or `exit` to leave._\n")?;

        let mut lines = BufReader::new(stdin()).lines();
        loop {
            self.renderer.prompt("> ")?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();
            if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
                break;
            }
            if line.is_empty() {
                continue;
            }
            self.send(chat, line).await?;
        }
        Ok(())
    }

    async fn send(&self, chat: &ChatFlow, message: &str) -> Result<()> {
        match chat.send(message).await {
            Ok(turn) => self.renderer.render(&turn.to_string()),
            Err(e) if e.kind() == ErrorKind::Validation => {
                let status = OperationStatus::failure("Message must not be empty");
                self.renderer.render(&status.to_string())
            }
            Err(e) => self.fail("Failed to send message", e),
        }
    }

    pub async fn show(&self) -> Result<()> {
        let entry = self
            .client
            .store()
            .entry()
            .await
            .context("Failed to read session store")?;

        match entry {
            Some(slot) => {
                let output = StoredItinerary {
                    result: &slot.result,
                    stored_at: &slot.stored_at,
                }
                .to_string();
                self.renderer.render(&output)
            }
            None => self
                .renderer
                .render("No itinerary found. Run `wf plan` to generate one.\n"),
        }
    }

    pub async fn health(&self) -> Result<()> {
        match self.client.health().await {
            Ok(status) if status.is_healthy() => {
                let status =
                    OperationStatus::success(format!("Itinerary service is {}", status.status));
                self.renderer.render(&status.to_string())
            }
            Ok(status) => {
                let message = format!("Itinerary service reported '{}'", status.status);
                self.renderer
                    .render(&OperationStatus::failure(message.clone()).to_string())?;
                Err(anyhow!(message))
            }
            Err(e) => self.fail("Itinerary service is unreachable", e),
        }
    }

    pub async fn reset(&self) -> Result<()> {
        let removed = self
            .client
            .store()
            .clear()
            .await
            .context("Failed to clear session store")?;

        let message = if removed {
            "Stored itinerary removed"
        } else {
            "Session store was already empty"
        };
        self.renderer
            .render(&OperationStatus::success(message).to_string())
    }

    pub fn options(&self) -> Result<()> {
        show_options(&self.renderer)
    }

    /// Shows the user-facing message and returns a non-zero exit.
    fn fail(&self, context: &'static str, e: TravelError) -> Result<()> {
        error!("{context}: {e}");
        self.renderer
            .render(&OperationStatus::failure(e.user_message()).to_string())?;
        Err(anyhow::Error::new(e).context(context))
    }
}
