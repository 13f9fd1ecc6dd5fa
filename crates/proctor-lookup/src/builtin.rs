//! Built-in finals-week grid. Keys are stored pre-normalized (lowercase,
//! no surrounding whitespace) — `ScheduleTable::builtin` relies on that.

/// Meeting-slot rows plus per-course overrides for courses whose exam
/// does not follow their meeting slot.
pub(crate) const ENTRIES: &[(&str, &str)] = &[
    // MWF meeting slots
    ("8:30 mwf", "WED 10:00 AM–12:00 PM"),
    ("9:30 mwf", "FRI 10:00 AM–12:00 PM"),
    ("10:30 mwf", "TU 10:00 AM–12:00 PM"),
    ("11:30 mwf", "TH 10:00 AM–12:00 PM"),
    ("12:30 mwf", "WED 1:30 PM–3:30 PM"),
    ("1:30 mwf", "TU 1:30 PM–3:30 PM"),
    ("2:30 mwf", "TH 1:30 PM–3:30 PM"),
    ("3:30 mwf", "FRI 1:30 PM–3:30 PM"),
    ("4:30 mwf", "WED 4:00 PM–6:00 PM"),
    // TTh meeting slots
    ("8:00 tth", "TU 8:00 AM–10:00 AM"),
    ("9:30 tth", "TH 8:00 AM–10:00 AM"),
    ("11:00 tth", "WED 8:00 AM–10:00 AM"),
    ("12:30 tth", "FRI 8:00 AM–10:00 AM"),
    ("2:00 tth", "TU 4:00 PM–6:00 PM"),
    ("3:30 tth", "TH 4:00 PM–6:00 PM"),
    ("5:00 tth", "FRI 4:00 PM–6:00 PM"),
    // Course-code overrides
    ("cmsc 23200", "WED 10:00 AM–12:00 PM"),
    ("cmsc 14200", "TU 10:00 AM–12:00 PM"),
    ("math 15300", "TH 10:00 AM–12:00 PM"),
    ("math 16200", "WED 1:30 PM–3:30 PM"),
    ("stat 23400", "FRI 10:00 AM–12:00 PM"),
    ("econ 20000", "TU 1:30 PM–3:30 PM"),
    ("phys 13200", "TH 4:00 PM–6:00 PM"),
    ("chem 11300", "WED 4:00 PM–6:00 PM"),
];
