use utoipa::OpenApi;

use crate::modules::cron::model::CronStatus;
use crate::modules::health::controller::HealthStatus;
use crate::scheduler::RunReport;
use bharat_models::{AggregateRecord, PeriodType};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health,
        crate::modules::stats::controller::get_state_all,
        crate::modules::stats::controller::get_district,
        crate::modules::cron::controller::trigger_run,
        crate::modules::cron::controller::get_status,
    ),
    components(
        schemas(
            AggregateRecord,
            PeriodType,
            RunReport,
            CronStatus,
            HealthStatus,
        )
    ),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Statistics", description = "Cached MGNREGA district statistics"),
        (name = "Pipeline", description = "Fetch-transform-store runs")
    ),
    info(
        title = "Bharat Digital API",
        version = "0.1.0",
        description = "District-level MGNREGA statistics fetched from data.gov.in and served from Redis.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
