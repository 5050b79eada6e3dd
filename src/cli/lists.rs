//! `farms` and `devices`: page through a list and print it as a table.

use super::session::require_session;
use super::CliContext;
use crate::api::{AtlasesSource, SystemsSource};
use crate::cli_output::{icons, print_footer, print_header, Table};
use crate::error::SpheragResult;
use crate::models::{Atlas, System};
use crate::state::{ListController, LoadOutcome};
use crate::traits::{CredentialsProvider, HttpClient, PageSource};

/// Load page 1, then keep loading until exhausted when `all` is set.
pub(crate) async fn load_pages<S: PageSource>(
    controller: &ListController<S>,
    all: bool,
) -> SpheragResult<()> {
    controller.load_initial().await?;
    while all && !controller.inspect(|list| list.is_exhausted()) {
        if let LoadOutcome::Skipped | LoadOutcome::Cancelled = controller.load_more().await? {
            break;
        }
    }
    Ok(())
}

pub(crate) fn farms_table(farms: &[System]) -> Table {
    let mut table = Table::new([("", 1), ("ID", 8), ("NAME", 30), ("COUNTRY", 12), ("TIMEZONE", 20)]);
    for farm in farms {
        table.push(vec![
            if farm.favorite { icons::FAVORITE } else { "" }.to_string(),
            farm.id.to_string(),
            farm.name.clone(),
            farm.country.clone().unwrap_or_default(),
            farm.timezone.clone().unwrap_or_default(),
        ]);
    }
    table
}

pub(crate) fn devices_table(devices: &[Atlas]) -> Table {
    let mut table = Table::new([
        ("IMEI", 16),
        ("NAME", 24),
        ("STATUS", 24),
        ("BATTERY", 11),
        ("SIGNAL", 6),
    ]);
    for device in devices {
        table.push(vec![
            device.imei.clone(),
            device.name.clone(),
            device.status_label(),
            device.battery_display(),
            device.signal_display(),
        ]);
    }
    table
}

/// `3 farms`, `3 of 20 farms match 'Sur'`, plus a hint when more pages exist.
pub(crate) fn summary(noun: &str, shown: usize, loaded: usize, query: &str, exhausted: bool) -> String {
    let mut line = if query.is_empty() {
        format!("{} {}", shown, noun)
    } else {
        format!("{} of {} {} match '{}'", shown, loaded, noun, query)
    };
    if !exhausted {
        line.push_str(" (more available, use --all)");
    }
    line
}

pub async fn run_farms<C, P>(ctx: &CliContext<C, P>, search: Option<&str>, all: bool) -> SpheragResult<()>
where
    C: HttpClient + 'static,
    P: CredentialsProvider,
{
    require_session(ctx)?;
    let controller = ListController::with_list(
        SystemsSource::new(ctx.api.clone()),
        ctx.store.systems_list(),
    );
    load_pages(&controller, all).await?;

    let query = search.unwrap_or("");
    let farms = controller.filtered(query);
    let (loaded, exhausted) = controller.inspect(|list| (list.len(), list.is_exhausted()));

    print_header("FARMS");
    farms_table(&farms).print();
    print_footer(&summary("farms", farms.len(), loaded, query, exhausted));
    Ok(())
}

pub async fn run_devices<C, P>(
    ctx: &CliContext<C, P>,
    system_id: i64,
    search: Option<&str>,
    all: bool,
) -> SpheragResult<()>
where
    C: HttpClient + 'static,
    P: CredentialsProvider,
{
    require_session(ctx)?;
    let controller = ListController::new(AtlasesSource::new(ctx.api.clone(), system_id));
    load_pages(&controller, all).await?;

    let query = search.unwrap_or("");
    let devices = controller.filtered(query);
    let (loaded, exhausted) = controller.inspect(|list| (list.len(), list.is_exhausted()));

    print_header(&format!("DEVICES OF FARM {}", system_id));
    devices_table(&devices).print();
    print_footer(&summary("devices", devices.len(), loaded, query, exhausted));
    Ok(())
}
