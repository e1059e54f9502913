//! Input tables shared by the end-to-end tests.

pub const TASKS_CSV: &str = "\
Category,Priority,Task,Status,StatusNotes,CursorPrompt
Search,P0,Fix /search page filters,In progress,Filters reset on back,Check `/api/listings` handler
Search,P2,Fix /search page filters,done,Verified on staging,Check `/api/listings` handler
Billing,P1,Add Stripe webhooks for renewals,Blocked,Waiting on keys,
Messaging,high,\"Inbox, threads and unread badges\",needs more testing,\"Multi-line
note\",
,n/a,Polish footer links,,,
Reports,P1,,Done,row without a task,
";

pub const TEST_MATRIX_CSV: &str = "\
Feature,Scenario,TestSteps,ExpectedResult
search,Filters,Apply price filter,Only matching listings
Search,Back nav,Press back after filtering,Filters kept
,Orphan,Ignored,Ignored
billing,Webhook,Send test event,
";

pub const MASTER_HEADER: &str = "ID,Feature / Area,Page / Route,Description,Priority,Status,Owner,Environment,Last Updated,Test Instructions,Notes";

pub const ROADMAP_YAML: &str = "\
tasks:
  - feature: UI/UX - Map
    route: /listings
    description: Cluster map markers when zoomed out
    priority: P0
    status: Planned
    test_instructions: |
      1) Zoom out on /listings.
      2) Verify markers cluster.
    notes: Performance with large result sets.
  - feature: Compliance
    route: /settings/privacy
    description: UK cookie consent banner
    priority: low
    status: Planned
    environment: UK
";
