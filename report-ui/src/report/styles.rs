pub const REPORT_STYLES: &str = r#"
/* Layout */
.report-app {
    display: flex;
    flex-direction: column;
    min-height: 100vh;
    background: var(--report-bg, #0f172a);
    color: var(--text-primary, #e2e8f0);
    font-family: system-ui, -apple-system, sans-serif;
    font-size: 14px;
}

.report-header {
    display: flex;
    align-items: center;
    justify-content: space-between;
    gap: 1rem;
    padding: 0.75rem 1.25rem;
    background: var(--header-bg, #1e293b);
    border-bottom: 1px solid var(--border-color, #334155);
}

.report-title h1 {
    margin: 0;
    font-size: 1.25rem;
}

.report-suite {
    color: var(--text-secondary, #94a3b8);
}

.report-body {
    display: flex;
    flex: 1;
    min-height: 0;
}

.report-sidebar {
    width: 18rem;
    flex-shrink: 0;
    padding: 0.75rem;
    border-right: 1px solid var(--border-color, #334155);
    overflow-y: auto;
}

.report-main {
    flex: 1;
    padding: 1rem 1.25rem;
    overflow: auto;
}

/* Status badges */
.status {
    display: inline-block;
    min-width: 3.5rem;
    padding: 0.1rem 0.4rem;
    border-radius: 0.25rem;
    font-size: 0.75rem;
    font-weight: 600;
    text-align: center;
}

.status--pass { background: #065f46; color: #d1fae5; }
.status--fail { background: #991b1b; color: #fee2e2; }
.status--error { background: #9a3412; color: #ffedd5; }
.status--info { background: #1e40af; color: #dbeafe; }
.status--none { background: #334155; color: #cbd5e1; }
.status--partial { background: #854d0e; color: #fef9c3; }

.stats-bar {
    display: flex;
    align-items: center;
    gap: 0.5rem;
}

.stats-total {
    color: var(--text-secondary, #94a3b8);
}

/* Sidebar */
.home-button,
.filter-button {
    background: transparent;
    color: inherit;
    border: 1px solid var(--border-color, #334155);
    border-radius: 0.25rem;
    padding: 0.25rem 0.5rem;
    cursor: pointer;
}

.home-button {
    width: 100%;
    margin-bottom: 0.5rem;
}

.home-button.active,
.filter-button.active {
    background: #2563eb;
    border-color: #2563eb;
}

.filter-bar {
    display: flex;
    flex-wrap: wrap;
    gap: 0.25rem;
    margin-bottom: 0.75rem;
    text-transform: uppercase;
}

.test-list {
    list-style: none;
    margin: 0;
    padding: 0;
}

.test-item {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    padding: 0.35rem 0.4rem;
    border-radius: 0.25rem;
    cursor: pointer;
}

.test-item:hover { background: #1e293b; }
.test-item.active { background: #1d4ed8; }

.test-name {
    overflow: hidden;
    text-overflow: ellipsis;
    white-space: nowrap;
}

/* Panels and banners */
.panel {
    margin-bottom: 1rem;
    padding: 0.75rem 1rem;
    background: #111827;
    border: 1px solid var(--border-color, #334155);
    border-radius: 0.5rem;
}

.panel h2 {
    margin: 0 0 0.5rem;
    font-size: 1rem;
}

.banner {
    margin: 0.75rem 1.25rem;
    padding: 0.5rem 0.75rem;
    border-radius: 0.375rem;
}

.banner--error { background: #450a0a; border: 1px solid #991b1b; }
.banner--warn { background: #422006; border: 1px solid #854d0e; }
.banner-detail { color: #fca5a5; font-size: 0.8rem; }

.placeholder {
    color: var(--text-secondary, #94a3b8);
    font-style: italic;
}

.run-facts {
    display: grid;
    grid-template-columns: max-content 1fr;
    gap: 0.25rem 1rem;
    margin: 0;
}

.run-facts dt { color: var(--text-secondary, #94a3b8); }
.run-facts dd { margin: 0; }

/* Tables */
.table-scroll { overflow-x: auto; }

.report-table,
.env-table,
.nested-table,
.dtc-table {
    border-collapse: collapse;
    font-size: 0.8125rem;
}

.report-table th,
.report-table td,
.env-table th,
.env-table td,
.nested-table th,
.nested-table td,
.dtc-table th,
.dtc-table td {
    border: 1px solid var(--border-color, #334155);
    padding: 0.2rem 0.5rem;
    text-align: left;
    vertical-align: top;
}

.report-table th,
.env-table th,
.nested-table th,
.dtc-table th {
    background: #1e293b;
    font-weight: 600;
}

.cell--pass { color: #34d399; }
.cell--fail { color: #f87171; }
.cell--error { color: #fb923c; }

.mono {
    font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
}

/* Step tree */
.detail-header {
    display: flex;
    align-items: center;
    gap: 0.75rem;
}

.detail-goal { margin: 0 0 0.5rem; }

.requirements {
    display: flex;
    flex-wrap: wrap;
    gap: 0.25rem;
}

.requirement {
    padding: 0.1rem 0.4rem;
    border-radius: 0.25rem;
    background: #1e293b;
    font-size: 0.75rem;
}

.condition {
    display: flex;
    gap: 0.75rem;
    margin-top: 0.5rem;
}

.condition-comment { color: var(--text-secondary, #94a3b8); }
.condition-history { margin-top: 0.5rem; }

.step-tree {
    border: 1px solid var(--border-color, #334155);
    border-radius: 0.5rem;
    overflow: hidden;
}

.step-row {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    padding-top: 0.3rem;
    padding-bottom: 0.3rem;
    padding-right: 0.75rem;
    border-bottom: 1px solid #1e293b;
}

.step-row--group,
.step-row--diagnostic,
.step-row--table,
.step-row--chart,
.step-row--text {
    cursor: pointer;
}

.step-row:hover { background: #1e293b; }

.step-caret {
    width: 1rem;
    color: var(--text-secondary, #94a3b8);
}

.step-label {
    flex: 1;
    white-space: pre-wrap;
}

.step-note {
    margin-left: 0.5rem;
    color: var(--text-secondary, #94a3b8);
}

.step-time {
    color: var(--text-secondary, #94a3b8);
    font-variant-numeric: tabular-nums;
}

.step-body {
    padding: 0.5rem 1rem 0.75rem 2.5rem;
    background: #0b1220;
    border-bottom: 1px solid #1e293b;
}

.table-caption {
    margin-bottom: 0.25rem;
    font-weight: 600;
}

.text-body {
    margin: 0;
    white-space: pre-wrap;
    font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
    font-size: 0.8125rem;
}

.diagnostic-name {
    margin-bottom: 0.25rem;
    font-weight: 600;
}

.diagnostic-section h4 {
    margin: 0.5rem 0 0.25rem;
    font-size: 0.8125rem;
    color: var(--text-secondary, #94a3b8);
}

.diagnostic-raw {
    display: block;
    word-break: break-all;
}

.diagnostic-params { margin-top: 0.25rem; }

/* Charts */
.chart-title {
    margin-bottom: 0.25rem;
    font-weight: 600;
}

.chart-host {
    width: 100%;
    cursor: crosshair;
    user-select: none;
}

.chart-readout {
    display: flex;
    flex-wrap: wrap;
    gap: 0.5rem;
    margin-top: 0.25rem;
    font-size: 0.8125rem;
}

.readout-x {
    color: var(--text-secondary, #94a3b8);
}

.readout-entry {
    display: inline-flex;
    align-items: center;
    gap: 0.3rem;
    background: transparent;
    color: inherit;
    border: 1px solid var(--border-color, #334155);
    border-radius: 0.25rem;
    padding: 0.1rem 0.4rem;
    cursor: pointer;
}

.readout-entry--hidden { opacity: 0.45; }
.readout-entry--hidden .readout-name { text-decoration: line-through; }

.readout-swatch {
    width: 0.75rem;
    height: 0.75rem;
    border-radius: 0.125rem;
}

.chart-stats,
.chart-ylabel {
    margin-top: 0.25rem;
    font-size: 0.75rem;
    color: var(--text-secondary, #94a3b8);
}

/* Test cases */
.test-case-list {
    list-style: none;
    margin: 0;
    padding: 0;
}

.test-case-list li {
    display: flex;
    gap: 0.5rem;
    padding: 0.2rem 0;
}

/* Loading */
.loading-state {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    padding: 1rem 0;
    color: var(--text-secondary, #94a3b8);
}

.spinner {
    display: inline-block;
    animation: spin 1s linear infinite;
}

@keyframes spin {
    from { transform: rotate(0deg); }
    to { transform: rotate(360deg); }
}
"#;
