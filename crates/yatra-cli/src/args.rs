//! Command-line interface definitions using clap
//!
//! Every subcommand has its own argument struct carrying the clap-specific
//! attributes. The structs convert into the framework-free parameter types
//! of `yatra_core::params`, so the core stays unaware of clap:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Companion
//! ```

use clap::{Args as ClapArgs, Parser, Subcommand};
use jiff::Timestamp;
use yatra_core::{
    params::{self, DESTINATION},
    DarshanQuery, ItinerarySchema, Language, SafetyAlertRequest, TranslationRequest, TripRequest,
    VoiceQuery, WeatherLookup, WeatherPolicy,
};

/// Pilgrim companion for Srisailam
///
/// Plans trips, reports weather-based safety alerts for the ghat road,
/// translates short phrases into Telugu and answers travel questions. Also
/// runs as an MCP (Model Context Protocol) server for AI assistants.
#[derive(Parser)]
#[command(version, about, name = "yatra")]
pub struct Args {
    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Generation model to use instead of $OPENAI_MODEL
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Weather behavior without an OpenWeather key (placeholder or strict)
    #[arg(long, global = true)]
    pub weather_policy: Option<WeatherPolicy>,

    /// Itinerary output shape (v1 narrative, v2 structured)
    #[arg(long, global = true)]
    pub itinerary_schema: Option<ItinerarySchema>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Plan a trip: safety alerts first, then the itinerary
    #[command(alias = "plan")]
    Itinerary(ItineraryArgs),
    /// Show weather-based safety alerts
    Alerts(AlertsArgs),
    /// Translate a short phrase into Telugu
    #[command(alias = "tr")]
    Translate(TranslateArgs),
    /// Ask a travel question, as if spoken to the assistant
    Ask(AskArgs),
    /// Show current weather for a place
    Weather(WeatherArgs),
    /// Show emergency contacts, hospitals and ghat road timings
    Emergency,
    /// Browse the darshan FAQ
    Darshan(DarshanArgs),
    /// Run a generation operation on raw JSON input and print raw JSON
    Generate(GenerateArgs),
    /// Print the JSON schema of an operation's output
    Schema(SchemaArgs),
    /// Start the MCP server
    Serve,
}

fn parse_arrival(raw: &str) -> Result<Timestamp, String> {
    params::parse_arrival(raw).map_err(|e| e.to_string())
}

#[derive(ClapArgs)]
pub struct ItineraryArgs {
    /// Starting city or coordinates
    #[arg(long)]
    pub from: String,

    /// Arrival at Srisailam, e.g. 2024-05-01T21:30 (IST) or an RFC 3339
    /// timestamp
    #[arg(long, value_parser = parse_arrival)]
    pub arrive: Timestamp,

    /// Number of people travelling
    #[arg(short, long, default_value_t = 1)]
    pub group_size: u32,

    /// Hotel already booked, if any
    #[arg(long)]
    pub hotel: Option<String>,

    /// Language of the itinerary (English or Hindi)
    #[arg(short, long, default_value_t = Language::English)]
    pub language: Language,

    /// Weather alert summary to plan around; fetched when omitted
    #[arg(long)]
    pub weather_alerts: Option<String>,

    /// Do not fetch safety alerts before planning
    #[arg(long)]
    pub skip_alerts: bool,
}

impl From<ItineraryArgs> for TripRequest {
    fn from(args: ItineraryArgs) -> Self {
        TripRequest {
            from: args.from,
            arrive_datetime: args.arrive,
            group_size: args.group_size,
            hotel: args.hotel,
            language: args.language,
            weather_alerts: args.weather_alerts,
        }
    }
}

#[derive(ClapArgs)]
pub struct AlertsArgs {
    /// Place to check
    #[arg(default_value = DESTINATION)]
    pub location: String,
}

impl From<AlertsArgs> for SafetyAlertRequest {
    fn from(args: AlertsArgs) -> Self {
        SafetyAlertRequest::new(args.location)
    }
}

#[derive(ClapArgs)]
pub struct TranslateArgs {
    /// Phrase to translate
    pub phrase: String,
}

impl From<TranslateArgs> for TranslationRequest {
    fn from(args: TranslateArgs) -> Self {
        TranslationRequest {
            phrase: args.phrase,
        }
    }
}

#[derive(ClapArgs)]
pub struct AskArgs {
    /// The question, as transcribed text
    pub text: String,

    /// Language of the question (English or Hindi)
    #[arg(short, long, default_value_t = Language::English)]
    pub language: Language,

    /// Trip details to answer against (from, dates, hotel)
    #[arg(long)]
    pub trip_details: Option<String>,

    /// Current weather and road alerts
    #[arg(long)]
    pub alerts: Option<String>,
}

impl From<AskArgs> for VoiceQuery {
    fn from(args: AskArgs) -> Self {
        VoiceQuery {
            transcribed_text: args.text,
            language: args.language,
            trip_details: args.trip_details,
            current_alerts: args.alerts,
        }
    }
}

#[derive(ClapArgs)]
pub struct WeatherArgs {
    /// Place name
    #[arg(default_value = DESTINATION)]
    pub location: String,
}

impl From<WeatherArgs> for WeatherLookup {
    fn from(args: WeatherArgs) -> Self {
        WeatherLookup {
            location: args.location,
        }
    }
}

#[derive(ClapArgs)]
pub struct DarshanArgs {
    /// FAQ id or keyword; lists every entry when omitted
    pub query: Option<String>,
}

impl From<DarshanArgs> for DarshanQuery {
    fn from(args: DarshanArgs) -> Self {
        DarshanQuery { query: args.query }
    }
}

#[derive(ClapArgs)]
pub struct GenerateArgs {
    /// Operation name (itinerary, safety_alerts, translate_phrase,
    /// voice_query)
    pub operation: String,

    /// Operation input as a JSON object
    pub input: String,
}

#[derive(ClapArgs)]
pub struct SchemaArgs {
    /// Operation name (itinerary, safety_alerts, translate_phrase,
    /// voice_query)
    pub operation: yatra_core::Operation,
}
