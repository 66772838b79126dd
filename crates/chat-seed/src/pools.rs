//! Content pools the generator draws from. Structure is driven by indices;
//! these pools only vary the surface text.

pub const FIRST_NAMES: &[&str] = &[
    "Emma", "Liam", "Olivia", "Noah", "Ava", "Elijah", "Sophia", "Lucas",
    "Isabella", "Mason", "Mia", "James", "Charlotte", "Benjamin", "Amelia",
    "Jacob", "Harper", "Michael", "Evelyn", "Ethan", "Abigail", "Alexander",
    "Emily", "William",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller",
    "Davis", "Rodriguez", "Martinez", "Wilson", "Anderson", "Thomas",
    "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson",
    "White", "Harris", "Clark", "Lewis",
];

/// `None` entries leave the status line empty, like real profiles.
pub const STATUS_MESSAGES: &[Option<&str>] = &[
    Some("Available"),
    Some("Busy"),
    Some("In a meeting"),
    Some("Working from home"),
    None,
    Some("Do not disturb"),
    Some("Coffee break ☕"),
    Some("Coding..."),
    None,
    Some("Deadline approaching"),
    Some("Stay positive!"),
    None,
];

pub const SHORT_MESSAGES: &[&str] = &[
    "Sounds good!",
    "On my way",
    "Haha, exactly",
    "Sure thing",
    "Can't today, sorry",
    "Perfect, thanks!",
    "Let me check",
    "See you there",
    "Will do",
    "No worries at all",
];

pub const MEDIUM_MESSAGES: &[&str] = &[
    "Can you send me the updated spreadsheet when you get a chance?",
    "The flight has been delayed by two hours, will keep you posted",
    "Just submitted the final report, feels good to have that completed",
    "Have you tried that new coffee shop on Main Street? Their pastries are amazing",
    "Great catching up with you yesterday, we should do that more often",
    "I'm at the store now, do you need me to pick up anything while I'm here?",
    "The interview went really well, fingers crossed for good news soon",
    "Working late tonight to finish this project, but almost done now",
    "That movie you recommended was incredible, thanks for the suggestion!",
    "Everything is set for tomorrow's event, just need to confirm the catering",
];

pub const LONG_MESSAGES: &[&str] = &[
    "Hey there! I hope you're having a fantastic day. I just wanted to check in and \
     see how everything is going with your project. I've been working on some really \
     interesting stuff lately and would love to get your thoughts on it.",
    "Good morning! I wanted to let you know that the meeting yesterday went really \
     well. Everyone was impressed with your presentation and the ideas you brought \
     to the table. I think we're going to move forward with the new approach.",
    "Hi! I just finished reading this incredible book that I think you would \
     absolutely love. The author has such a unique perspective on life that really \
     resonated with me. Happy to lend it to you next time we meet.",
    "Hey! I wanted to share some exciting news with you. I've been working on a new \
     project for the past few months, and it's finally starting to come together. \
     It's been quite a journey with lots of challenges, but I'm really proud of it.",
];

pub const FILE_NAMES: &[&str] = &[
    "presentation.pdf",
    "report.docx",
    "spreadsheet.xlsx",
    "notes.txt",
    "proposal.pdf",
    "invoice.pdf",
    "budget.xlsx",
    "meeting_notes.docx",
    "project_plan.pdf",
    "slides.pptx",
];

pub const LINK_TITLES: &[&str] = &[
    "10 Tips for Productivity",
    "Breaking News Update",
    "New Technology Trends",
    "Health and Wellness Guide",
    "Recipe of the Day",
    "Movie Review",
    "Travel Destinations",
    "Book Recommendation",
];

pub const LINK_DESCRIPTIONS: &[&str] = &[
    "An interesting article about recent developments",
    "Must-read insights on this topic",
    "Comprehensive guide with practical tips",
    "Latest updates and analysis",
    "Expert opinions and recommendations",
    "Useful resources and information",
];

pub const GROUP_NAMES: &[&str] = &[
    "Best Friends",
    "Work Team",
    "Family Group",
    "Study Buddies",
    "Weekend Hikers",
    "Gaming Night",
    "Fitness Club",
    "Foodies United",
    "Travel Squad",
    "Book Club",
    "Project Alpha",
    "Neighbourhood Watch",
];

pub const AVATAR_URLS: &[&str] = &[
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=200&h=200&fit=crop&crop=faces",
    "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=200&h=200&fit=crop&crop=faces",
    "https://images.unsplash.com/photo-1527980965255-d3b416303d12?w=200&h=200&fit=crop&crop=faces",
    "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=200&h=200&fit=crop&crop=faces",
    "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=200&h=200&fit=crop&crop=faces",
    "https://images.unsplash.com/photo-1534528741775-53994a69daeb?w=200&h=200&fit=crop&crop=faces",
    "https://images.unsplash.com/photo-1517841905240-472988babdf9?w=200&h=200&fit=crop&crop=faces",
    "https://images.unsplash.com/photo-1488161628813-04466f872be2?w=200&h=200&fit=crop&crop=faces",
];
