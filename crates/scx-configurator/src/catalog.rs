use serde::Serialize;

/// A named bundle of command-line flags tuning a scheduler for a use case.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Mode {
    pub name: &'static str,
    /// Opaque flag text. Forwarded to the manager as one argument, never
    /// parsed or re-tokenized here.
    pub flags: &'static str,
    pub description: &'static str,
}

/// Reserved for an individual-flag toggle UI; no scheduler defines any yet.
/// Kept in the schema so adding toggles later does not change the shape of
/// the table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FlagToggle {
    pub flag: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SchedulerEntry {
    /// Modes in display order.
    pub modes: &'static [Mode],
    pub flags: &'static [FlagToggle],
}

const EMPTY_ENTRY: SchedulerEntry = SchedulerEntry {
    modes: &[],
    flags: &[],
};

// Keep every scheduler that `scxctl list` can report defined here. Adding a
// scheduler or mode means adding a literal entry; there is no runtime
// registration.
static CATALOG: &[(&str, SchedulerEntry)] = &[
    (
        "bpfland",
        SchedulerEntry {
            modes: &[
                Mode {
                    name: "Low Latency",
                    flags: "-s 5000 -S 500 -l 5000 -m performance",
                    description: "Meant to lower latency at the cost of throughput. Suitable for soft real-time applications like Audio Processing and Multimedia.",
                },
                Mode {
                    name: "Power Save",
                    flags: "-m powersave",
                    description: "Prioritizes power efficiency. Favors less performant cores (e.g E-cores on Intel).",
                },
                Mode {
                    name: "Server",
                    flags: "-p",
                    description: "Prioritize tasks with strict affinity. This option can increase throughput at the cost of latency and it is more suitable for server workloads.",
                },
            ],
            flags: &[],
        },
    ),
    (
        "flash",
        SchedulerEntry {
            modes: &[
                Mode {
                    name: "Low Latency",
                    flags: "-m performance -w -C 0",
                    description: "Meant to lower latency at the cost of throughput. Suitable for soft real-time applications like Audio Processing and Multimedia.",
                },
                Mode {
                    name: "Gaming",
                    flags: "-m all",
                    description: "Optimizes for high performance in games.",
                },
                Mode {
                    name: "Power Save",
                    flags: "-m powersave -I 10000 -t 10000 -s 10000 -S 1000",
                    description: "Prioritizes power efficiency. Favor less performant cores (e.g., E-cores on Intel) and introduces a forced idle cycle every 10ms to increase power saving.",
                },
                Mode {
                    name: "Server",
                    flags: "-m all -s 20000 -S 1000 -I -1 -D -L",
                    description: "Tuned for server workloads. Trades responsiveness for throughput.",
                },
            ],
            flags: &[],
        },
    ),
    (
        "cosmos",
        SchedulerEntry {
            modes: &[
                Mode {
                    name: "Auto",
                    flags: "-d",
                    description: "Disables deferred wakeups. Reduces throughput and performance for certain workloads while decreasing power consumption.",
                },
                Mode {
                    name: "Gaming",
                    flags: "-c 0 -p 0",
                    description: "Disable CPU load tracking and always enforce deadline-based scheduling to improve responsiveness.",
                },
                Mode {
                    name: "Power Save",
                    flags: "-m powersave -d -p 5000",
                    description: "Prioritizes power efficiency. Favor less performant cores (e.g., E-cores on Intel) and disables deferred wakeups, reducing throughput while increasing power efficiency. CPU load polling increased to 5ms.",
                },
                Mode {
                    name: "Low Latency",
                    flags: "-m performance -c 0 -p 0 -w",
                    description: "Meant to lower latency at the cost of throughput. Suitable for soft real-time applications like Audio Processing and Multimedia. Always enforce deadline-based scheduling and synchronous wake up optimizations to improve performance predictability.",
                },
                Mode {
                    name: "Server",
                    flags: "-a -s 20000",
                    description: "Enable address space affinity to improve locality and performance in certain cache-sensitive workloads. Polling increased to 20ms.",
                },
            ],
            flags: &[],
        },
    ),
    (
        "lavd",
        SchedulerEntry {
            modes: &[
                Mode {
                    name: "Gaming & Low Latency",
                    flags: "--performance",
                    description: "Maximizes performance by using all available cores, prioritizing physical cores.",
                },
                Mode {
                    name: "Power Save",
                    flags: "--powersave",
                    description: "Minimizes power consumption while maintaining reasonable performance. Prioritizes efficient cores and threads over physical cores.",
                },
            ],
            flags: &[],
        },
    ),
    (
        "p2dq",
        SchedulerEntry {
            modes: &[
                Mode {
                    name: "Gaming",
                    flags: "--task-slice true -f --sched-mode performance",
                    description: "Improves consistency in gaming performance and increases bias towards scheduling on higher performance cores.",
                },
                Mode {
                    name: "Low Latency",
                    flags: "-y -f --task-slice true",
                    description: "Lowers latency by making interactive tasks stick more to the CPU they were assigned to and increasing the stability on slice time.",
                },
                Mode {
                    name: "Power Save",
                    flags: "--sched-mode efficiency",
                    description: "Enhances power efficiency by prioritizing power efficient cores.",
                },
                Mode {
                    name: "Server",
                    flags: "--keep-running",
                    description: "Improves server workloads by allowing tasks to run beyond their slice if the CPU is idle.",
                },
            ],
            flags: &[],
        },
    ),
    (
        "tickless",
        SchedulerEntry {
            modes: &[
                Mode {
                    name: "Gaming",
                    flags: "-f 5000 -s 5000",
                    description: "Boosts gaming performance by increasing how often the scheduler detects CPU contention and triggers context switches with a shorter time slice.",
                },
                Mode {
                    name: "Power Save",
                    flags: "-f 50 -p",
                    description: "Enhances power efficiency by lowering contention checks and aggressively trying to keep tasks on the same CPU.",
                },
                Mode {
                    name: "Low Latency",
                    flags: "-f 5000 -s 1000",
                    description: "Similar to the gaming profile but with a further reduced slice.",
                },
                Mode {
                    name: "Server",
                    flags: "-f 100",
                    description: "Reduced how often the scheduler checks for CPU contention to improve throughput at the cost of responsiveness.",
                },
            ],
            flags: &[],
        },
    ),
    ("rustland", EMPTY_ENTRY),
    ("rusty", EMPTY_ENTRY),
];

/// Total lookup: an id the table does not know resolves to an entry with no
/// modes and no flags, not to an error.
pub fn lookup(id: &str) -> &'static SchedulerEntry {
    CATALOG
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, entry)| entry)
        .unwrap_or(&EMPTY_ENTRY)
}

pub fn mode_lookup(id: &str, mode: &str) -> Option<&'static Mode> {
    lookup(id).modes.iter().find(|m| m.name == mode)
}

/// All schedulers the table knows about, in table order.
pub fn entries() -> impl Iterator<Item = (&'static str, &'static SchedulerEntry)> {
    CATALOG.iter().map(|(name, entry)| (*name, entry))
}
