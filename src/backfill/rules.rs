//! The ordered trigger table. Order matters: the first match wins.

use super::{Rule, Trigger};

/// Backfill rules, checked top to bottom.
pub static RULES: &[Rule] = &[
    Rule {
        trigger: Trigger::ContainsFolded("multi-image upload"),
        instructions: "1) Login as wholesaler.
2) Navigate to Post a Deal page.
3) Upload multiple images (3-5 photos).
4) Verify all images upload successfully and appear in preview.
5) Submit listing and verify all images are saved.
6) View listing detail page and verify all images display in carousel.",
    },
    Rule {
        trigger: Trigger::Contains("Alerts Admin"),
        instructions: "1) Login as admin user.
2) Navigate to /admin/alerts page.
3) Verify alerts list loads without errors.
4) Test real-time subscription updates by creating/modifying alerts from another session.
5) Verify error handling when alerts service is unavailable.",
    },
    Rule {
        trigger: Trigger::Contains("Watchlist Admin"),
        instructions: "1) Login as admin user.
2) Navigate to /admin/watchlists page.
3) Verify watchlist data loads correctly.
4) Test filtering and sorting functionality.
5) Verify error handling for deleted/unavailable listings.",
    },
    Rule {
        trigger: Trigger::All(&["Analytics Dashboard", "Admin"]),
        instructions: "1) Login as admin user.
2) Navigate to /admin/analytics.
3) Verify dashboard loads with all metrics displaying correctly.
4) Test date range filters and verify charts update.
5) Verify data accuracy and no NaN/undefined values.
6) Test export functionality if available.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("stripe webhooks"),
        instructions: "1) Use Stripe CLI to forward webhooks to local environment.
2) Trigger test events: subscription.created, subscription.updated, subscription.deleted, payment_succeeded.
3) Verify webhook handlers process events correctly.
4) Verify idempotency - duplicate events are handled gracefully.
5) Check database to ensure subscription status updates correctly.
6) Test in production with real Stripe events.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("map rendering"),
        instructions: "1) Navigate to listings page.
2) Verify map renders without flicker or errors.
3) Test marker clustering with multiple listings.
4) Verify polygon drawing works and persists correctly.
5) Check browser console for AdvancedMarkerElement deprecation warnings.
6) Test on mobile and desktop browsers.",
    },
    Rule {
        trigger: Trigger::Contains("CRM Export"),
        instructions: "1) Login as admin.
2) Navigate to CRM Export page.
3) Verify export functionality is implemented (not 'Coming Soon').
4) Test CSV export with various filters.
5) Verify exported data matches database records.",
    },
    Rule {
        trigger: Trigger::Contains("Repair Estimator"),
        instructions: "1) Navigate to repair estimator tool (if route exists).
2) Input property details and verify estimator logic runs.
3) Verify results display correctly.
4) Test with different property types and conditions.",
    },
    Rule {
        trigger: Trigger::Contains("AI Usage Reporting"),
        instructions: "1) Login as admin.
2) Navigate to AI usage reporting page.
3) Verify usage metrics display correctly for all users.
4) Test filtering by user, date range, feature type.
5) Verify quota tracking matches actual usage.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("production env vars"),
        instructions: "1) Review all environment variables required for production.
2) Verify all required vars are set in Vercel production environment.
3) Check that sensitive keys (API keys, secrets) are properly secured.
4) Test application startup with all env vars configured.
5) Verify no missing or undefined env var errors in production logs.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("image carousel"),
        instructions: "1) Navigate to a listing with multiple images.
2) Verify carousel displays all images correctly.
3) Test navigation (next/previous arrows, dots).
4) Verify smooth transitions and animations.
5) Test on mobile and desktop.",
    },
    Rule {
        trigger: Trigger::AnyFolded(&["pagination", "infinite scroll"]),
        instructions: "1) Navigate to listings page with many results.
2) Verify pagination or infinite scroll works correctly.
3) Test page navigation (if pagination) or scroll loading (if infinite scroll).
4) Verify URL parameters update correctly.
5) Test with filters applied.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("pdf output"),
        instructions: "1) Generate an AI analysis report.
2) Verify PDF download button/link is available.
3) Click download and verify PDF generates correctly.
4) Verify PDF contains all expected content.
5) Test PDF opens correctly in various PDF viewers.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("national trend scraping"),
        instructions: "1) Verify scraping jobs are scheduled and running.
2) Check database for scraped trend data.
3) Verify data appears in analytics dashboard.
4) Test data freshness and update frequency.",
    },
    Rule {
        trigger: Trigger::Contains("RecData"),
        instructions: "1) Verify RecData integration is configured.
2) Test sold comps data retrieval.
3) Verify data displays in listing detail pages.
4) Check data accuracy and completeness.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("lead notes"),
        instructions: "1) Navigate to CRM/leads section.
2) Select a lead.
3) Verify notes field/section is available.
4) Add, edit, and delete notes.
5) Verify notes persist and display correctly.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("homepage design"),
        instructions: "1) Navigate to homepage.
2) Verify new design matches Redfin/Zillow quality standards.
3) Test responsive design on mobile, tablet, desktop.
4) Verify value proposition is clear and compelling.
5) Test all CTAs and navigation elements.",
    },
    Rule {
        trigger: Trigger::AnyFolded(&["testimonials", "trust badges"]),
        instructions: "1) Navigate to homepage.
2) Verify testimonials section displays correctly.
3) Verify trust badges/logos are visible.
4) Test on mobile and desktop.
5) Verify testimonials rotate or display appropriately.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("loading skeletons"),
        instructions: "1) Navigate to listings page.
2) Trigger slow network (throttle in dev tools).
3) Verify skeleton loaders display during data fetch.
4) Verify skeletons match final content layout.
5) Test on multiple pages that load data.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("wholesaler/investor flows"),
        instructions: "1) Test new user signup flow for wholesaler.
2) Test new user signup flow for investor.
3) Verify onboarding steps guide users appropriately.
4) Test flow completion and profile setup.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("landing page lead capture"),
        instructions: "1) Visit landing page as anonymous user.
2) Verify lead capture form is prominent and clear.
3) Submit test lead information.
4) Verify lead is saved to database.
5) Test email notification is sent (if applicable).",
    },
    Rule {
        trigger: Trigger::Contains("DB indexing"),
        instructions: "1) Review database schema and identify slow queries.
2) Create indexes on frequently queried columns.
3) Test query performance before and after indexing.
4) Verify no negative impact on write performance.
5) Monitor query execution times in production.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("rate limits"),
        instructions: "1) Identify public API endpoints.
2) Implement rate limiting middleware.
3) Test rate limit enforcement by making excessive requests.
4) Verify appropriate error responses (429 Too Many Requests).
5) Test rate limit reset and recovery.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("sign-in loops"),
        instructions: "1) Test sign-in flow across all pages.
2) Verify no redirect loops occur.
3) Test session persistence after login.
4) Verify cookies are set correctly.
5) Test on different browsers and devices.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("mobile responsiveness"),
        instructions: "1) Test all pages on mobile devices (iPhone, Android).
2) Verify layouts adapt correctly to small screens.
3) Test touch interactions and gestures.
4) Verify navigation works on mobile.
5) Test on tablet sizes as well.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("session persistence"),
        instructions: "1) Login and verify session is established.
2) Refresh page and verify user remains logged in.
3) Close browser and reopen - verify session persists.
4) Test session expiration and renewal.
5) Test on mobile web and native app.",
    },
    Rule {
        trigger: Trigger::Contains("Owner-only edit/delete"),
        instructions: "1) Login as listing owner.
2) Verify edit/delete buttons are visible on own listings.
3) Login as different user.
4) Verify edit/delete buttons are NOT visible on other users' listings.
5) Attempt direct API access to edit/delete other user's listing - verify 403 error.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("watchlist errors"),
        instructions: "1) Add listings to watchlist.
2) Delete a listing that's in watchlist.
3) Verify watchlist handles deleted listings gracefully.
4) Test error messages are user-friendly.
5) Verify watchlist still functions correctly.",
    },
    Rule {
        trigger: Trigger::Contains("CSV/API Export"),
        instructions: "1) Navigate to export page/endpoint.
2) Select data filters.
3) Initiate CSV export.
4) Verify CSV downloads correctly.
5) Verify CSV contains expected data and format.
6) Test API export endpoint returns JSON correctly.",
    },
    Rule {
        trigger: Trigger::Contains("Export Reports"),
        instructions: "1) Login as admin.
2) Navigate to reports export page.
3) Select report type and date range.
4) Generate and download report.
5) Verify report contains correct data.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("ai analyzer errors"),
        instructions: "1) Test AI analyzer with valid inputs.
2) Test with invalid/edge case inputs.
3) Verify error messages are clear and helpful.
4) Test quota limits and verify appropriate messaging.
5) Test when AI service is unavailable.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("error logging"),
        instructions: "1) Trigger various errors (network, validation, server).
2) Verify errors are logged to Sentry/LogRocket.
3) Verify error details include useful context.
4) Test error alerting (if configured).
5) Verify production logs are accessible.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("mobile-first search"),
        instructions: "1) Test search on mobile device.
2) Verify search bar is easily accessible.
3) Test autocomplete and suggestions.
4) Verify filters work well on mobile.
5) Test search results display correctly.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("line-item output"),
        instructions: "1) Generate repair estimate.
2) Verify line items display in UI.
3) Verify itemized breakdown is clear.
4) Test export of line items.
5) Verify calculations are correct.",
    },
    Rule {
        trigger: Trigger::ContainsFolded("message notifications"),
        instructions: "1) Send a message to a user.
2) Verify recipient receives notification.
3) Test notification delivery methods (in-app, email).
4) Verify notification preferences are respected.
5) Test notification dismissal and marking as read.",
    },
];
