//! `rapport enrich`: one reconciliation round, selection, and persistence.

use std::sync::Arc;

use anyhow::{Context, Result};
use rapport_ai::{ComparisonClient, EnrichmentClient};
use rapport_core::{
    CanonicalFormData, DraftStore, EnrichmentRequest, EntityKind, Provider, WizardDraft,
};
use rapport_recon::Reconciler;
use rapport_store::{ClientStore, JsonFileDraftStore};
use tracing::info;

use crate::{EnrichArgs, display};

pub async fn run(args: EnrichArgs) -> Result<()> {
    let drafts = JsonFileDraftStore::new(&args.draft);
    let saved = drafts
        .load()
        .with_context(|| format!("reading draft {}", args.draft.display()))?;
    let kind: EntityKind = args.kind.into();
    let request = request_from(&args, saved.as_ref())?;

    drafts
        .save(&WizardDraft::new(kind, request.clone()))
        .context("saving draft")?;

    let remote = &args.remote;
    let provider_a =
        EnrichmentClient::new(Provider::A, kind, remote.config(&remote.provider_a_url))?;
    let provider_b =
        EnrichmentClient::new(Provider::B, kind, remote.config(&remote.provider_b_url))?;
    let comparer = ComparisonClient::new(remote.config(&remote.compare_url))?;
    let reconciler = Reconciler::new(
        Arc::new(provider_a),
        Arc::new(provider_b),
        Arc::new(comparer),
    );

    reconciler.auto_trigger(&request).await;
    let view = reconciler.snapshot().await;
    display::print_reconciliation(&view);

    let Some(choice) = args.select else {
        println!("Re-run with --select a|b|recommended to keep one result.");
        return Ok(());
    };
    let provider = choice.resolve(view.recommended_provider())?;
    let form = reconciler.select(provider).await?;
    drafts
        .save(&WizardDraft::new(kind, request).with_selection(provider, form.clone()))
        .context("saving draft")?;
    display::print_form(&form);

    let Some(owner) = args.owner.as_deref() else {
        println!("No --owner given; the selection is kept in the draft only.");
        return Ok(());
    };
    persist(&args, owner, &form)?;
    drafts.clear().context("clearing draft")?;
    Ok(())
}

/// Flags win; anything missing comes from the saved draft.
fn request_from(args: &EnrichArgs, saved: Option<&WizardDraft>) -> Result<EnrichmentRequest> {
    let fallback = saved.map(|d| d.request.clone()).unwrap_or_default();
    let request = EnrichmentRequest::new(
        args.name.clone().unwrap_or(fallback.entity_name),
        args.website.clone().unwrap_or(fallback.website_url),
        args.profile.clone().unwrap_or(fallback.profile_url),
    );
    request.validate()?;
    Ok(request)
}

fn persist(args: &EnrichArgs, owner: &str, form: &CanonicalFormData) -> Result<()> {
    // On failure the draft stays on disk so the run can be retried.
    let store = ClientStore::open_persistent(&args.db)
        .with_context(|| format!("opening {}", args.db.display()))?;
    match form {
        CanonicalFormData::Client(client) => {
            let id = store.insert_client(owner, client).context("saving client")?;
            info!(id, "client persisted");
            println!("Saved client #{id} ({}) to {}", client.company, args.db.display());
        }
        CanonicalFormData::Company(company) => {
            store
                .upsert_company_profile(owner, company)
                .context("saving company profile")?;
            println!(
                "Saved company profile for {} to {}",
                company.company_name,
                args.db.display()
            );
        }
    }
    Ok(())
}
