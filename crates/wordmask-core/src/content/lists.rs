//! Built-in word themes and clue lists.

pub(crate) const THEMES: &[(&str, &[&str])] = &[
    (
        "animals",
        &[
            "elephant", "penguin", "octopus", "giraffe", "dolphin", "parrot", "kangaroo",
            "chameleon", "flamingo", "hedgehog", "jellyfish", "lobster", "peacock", "porcupine",
            "raccoon", "seahorse", "toucan", "walrus", "cheetah", "cobra", "gorilla", "hamster",
            "iguana", "jaguar", "koala", "leopard", "moose", "narwhal", "ostrich", "panther",
            "rabbit", "scorpion", "turtle", "vulture",
        ],
    ),
    (
        "food",
        &[
            "pizza", "sushi", "hamburger", "taco", "waffle", "pretzel", "pancake", "burrito",
            "croissant", "dumpling", "fondue", "guacamole", "lasagna", "macaroni", "nachos",
            "omelette", "popcorn", "quesadilla", "ramen", "sandwich", "tiramisu", "brownie",
            "cheesecake", "donut", "eclair", "falafel", "gumbo", "hummus", "kebab", "muffin",
            "noodles", "paella",
        ],
    ),
    (
        "places",
        &[
            "beach", "hospital", "library", "airport", "volcano", "castle", "museum",
            "aquarium", "bakery", "cathedral", "desert", "factory", "glacier", "harbor",
            "island", "jungle", "lighthouse", "mountain", "nursery", "observatory", "palace",
            "quarry", "rainforest", "stadium", "temple", "university", "vineyard", "waterfall",
            "zoo", "canyon", "dungeon", "fortress",
        ],
    ),
    (
        "objects",
        &[
            "umbrella", "telescope", "skateboard", "candle", "piano", "hammer", "backpack",
            "compass", "doorbell", "envelope", "flashlight", "guitar", "headphones", "keyboard",
            "lantern", "microphone", "notebook", "parachute", "quilt", "refrigerator",
            "scissors", "toothbrush", "vacuum", "wheelchair", "xylophone", "binoculars",
            "calendar", "diamond", "escalator", "fountain",
        ],
    ),
    (
        "professions",
        &[
            "astronaut", "detective", "plumber", "surgeon", "pirate", "wizard", "architect",
            "barista", "carpenter", "dentist", "electrician", "firefighter", "gardener",
            "hairdresser", "journalist", "knight", "librarian", "mechanic", "navigator",
            "optician", "photographer", "ranger", "scientist", "teacher", "veterinarian",
            "waiter", "zookeeper", "blacksmith", "comedian", "drummer",
        ],
    ),
    (
        "activities",
        &[
            "swimming", "painting", "camping", "dancing", "cooking", "skiing", "bowling",
            "climbing", "diving", "fencing", "gardening", "hiking", "juggling", "kayaking",
            "meditation", "origami", "photography", "quilting", "running", "skateboarding",
            "tennis", "unicycling", "volleyball", "wrestling", "yoga", "archery", "baking",
            "cycling", "drawing", "fishing",
        ],
    ),
    (
        "movies",
        &[
            "The Shawshank Redemption", "The Godfather", "The Dark Knight", "12 Angry Men",
            "Schindler's List", "The Lord of the Rings: The Fellowship of the Ring",
            "Pulp Fiction", "The Good, The Bad, and The Ugly", "Forrest Gump", "Fight Club",
            "Inception", "The Matrix", "Goodfellas", "Interstellar",
            "One Flew Over the Cuckoo's Nest", "Se7en", "It's a Wonderful Life",
            "The Silence of the Lambs", "Saving Private Ryan", "The Green Mile", "Star Wars",
            "Back to the Future", "Spirited Away", "The Pianist", "Gladiator", "Psycho",
            "The Lion King", "The Departed", "The Prestige", "Casablanca", "The Usual Suspects",
            "Alien", "Django Unchained", "Rear Window", "Apocalypse Now", "WALL-E", "Memento",
            "Dune", "Raiders of the Lost Ark", "Avengers", "Spider-Man: Into the Spider-Verse",
            "The Shining", "Inglorious Basterds", "Good Will Hunting", "Coco", "Toy Story",
            "Braveheart", "American Beauty", "Joker", "Requiem for a Dream",
            "Eternal Sunshine of the Spotless Mind", "2001: A Space Odyssey", "Reservoir Dogs",
            "Heat", "Scarface", "Up", "Full Metal Jacket", "Die Hard", "A Clockwork Orange",
            "Snatch", "The Wolf of Wall Street", "Oppenheimer", "The Truman Show",
            "Shutter Island", "Batman Begins", "Taxi Driver", "Jurassic Park",
            "There Will Be Blood", "The Sixth Sense", "Casino", "No Country for Old Men",
            "The Thing", "Top Gun", "Kill Bill: Vol. 1", "A Beautiful Mind", "Finding Nemo",
            "Monty Python and the Holy Grail", "Lock, Stock and Two Smoking Barrels",
            "V for Vendetta", "Catch Me If You Can", "Inside Out", "Trainspotting",
            "Harry Potter", "Dead Poets Society", "Fargo", "Million Dollar Baby",
            "Mad Max: Fury Road", "Gran Torino", "The Grand Budapest Hotel", "12 Years a Slave",
            "Ratatouille", "Blade Runner", "How to Train Your Dragon",
            "Spider-Man: No Way Home", "Gone Girl", "Monsters, Inc.", "Jaws", "Rocky",
            "Pirates of the Caribbean: The Curse of the Black Pearl", "The Terminator",
            "The Big Lebowski", "The Incredibles",
        ],
    ),
];

pub(crate) const CLUE_LISTS: &[(&str, &[&str])] = &[
    (
        "general",
        &[
            "forest", "ocean", "river", "sky", "storm", "thunder", "rainbow", "sunrise",
            "moonlight", "shadow", "fire", "ice", "stone", "leaf", "flower", "seed", "root",
            "branch", "cloud", "wave", "wind", "snow", "rain", "dust", "golden", "crimson",
            "silver", "dark", "bright", "loud", "quiet", "sweet", "bitter", "sharp", "smooth",
            "rough", "warm", "cold", "soft", "heavy", "light", "deep", "tall", "tiny", "giant",
            "ancient", "wild", "gentle", "jump", "spin", "crash", "fly", "crawl", "hide",
            "chase", "escape", "build", "break", "grow", "shrink", "shine", "fade", "burn",
            "freeze", "splash", "whisper", "shout", "dance", "fight", "sleep", "hunt", "guard",
            "crown", "shield", "sword", "rope", "chain", "wheel", "mirror", "mask", "flag",
            "bell", "cage", "key", "lock", "map", "trap", "bridge", "tower", "wall", "gate",
            "path", "ladder", "net", "arrow", "target", "king", "queen", "warrior", "thief",
            "ghost", "dragon", "fairy", "monster", "dwarf", "angel", "demon", "hero", "villain",
            "alien", "robot", "hunter", "sailor", "farmer", "soldier", "merchant", "prince",
            "witch", "midnight", "dawn", "dusk", "forever", "instant", "future", "past",
            "north", "south", "east", "west", "above", "below", "inside", "outside", "center",
            "edge", "corner", "surface", "bottom", "peak", "horizon", "orbit", "honey", "spice",
            "sugar", "salt", "pepper", "juice", "cream", "bread", "fruit", "meat", "cheese",
            "soup", "stew", "feast", "crumb", "slice", "crystal", "velvet", "steel", "silk",
            "leather", "marble", "glass", "wood", "iron", "copper", "pearl", "ruby", "emerald",
            "sand", "clay", "wax", "treasure", "poison", "medicine", "weapon", "armor", "spell",
            "curse", "blessing", "signal", "warning", "symbol", "pattern", "rhythm", "melody",
            "harmony", "noise", "spark", "flame", "smoke", "ash", "mist", "fog", "steam",
        ],
    ),
    (
        "fantasy",
        &[
            "dragon", "wizard", "potion", "dungeon", "throne", "enchanted", "quest", "rune",
            "goblin", "elf", "orc", "dwarf", "knight", "sorcerer", "castle", "kingdom", "magic",
            "scroll", "wand", "crystal", "amulet", "curse", "blessing", "prophecy", "dragon",
            "phoenix", "unicorn", "griffin", "troll", "vampire", "werewolf", "fairy", "sword",
            "shield", "armor", "bow", "staff", "dagger", "helm", "cloak", "forest", "cavern",
            "tower", "bridge", "gate", "tomb", "shrine", "altar", "gold", "gem", "treasure",
            "crown", "ring", "chalice", "mirror", "orb", "shadow", "flame", "frost", "storm",
            "lightning", "darkness", "dawn", "moonlight", "ancient", "forbidden", "legendary",
            "mystical", "cursed", "sacred", "fallen", "eternal", "summon", "banish",
            "transform", "heal", "destroy", "enchant", "forge", "awaken", "demon", "spirit",
            "ghost", "wraith", "golem", "chimera", "hydra", "kraken", "tavern", "market",
            "arena", "prison", "library", "forge", "harbor", "ruins",
        ],
    ),
    (
        "everyday",
        &[
            "kitchen", "bedroom", "bathroom", "garden", "garage", "office", "school", "store",
            "phone", "computer", "television", "radio", "camera", "clock", "lamp", "chair",
            "breakfast", "lunch", "dinner", "snack", "coffee", "water", "milk", "tea", "car",
            "bus", "train", "bicycle", "walk", "drive", "park", "traffic", "morning",
            "afternoon", "evening", "night", "weekend", "holiday", "birthday", "meeting",
            "family", "friend", "neighbor", "teacher", "doctor", "boss", "child", "parent",
            "money", "work", "home", "shopping", "cooking", "cleaning", "sleeping", "reading",
            "happy", "tired", "busy", "hungry", "late", "early", "quick", "slow", "shirt",
            "shoes", "jacket", "hat", "bag", "wallet", "glasses", "umbrella", "door", "window",
            "stairs", "floor", "roof", "fence", "sidewalk", "street", "mail", "package", "bill",
            "receipt", "ticket", "schedule", "list", "note", "pet", "plant", "weather", "rain",
            "sunshine", "snow", "wind", "cloud",
        ],
    ),
    (
        "science",
        &[
            "atom", "molecule", "cell", "gene", "protein", "virus", "bacteria", "enzyme",
            "gravity", "orbit", "planet", "star", "galaxy", "comet", "asteroid", "nebula",
            "laser", "radar", "signal", "frequency", "wavelength", "spectrum", "particle",
            "quantum", "volcano", "earthquake", "glacier", "fossil", "mineral", "crystal",
            "magnet", "current", "experiment", "theory", "hypothesis", "data", "formula",
            "equation", "variable", "constant", "oxygen", "carbon", "hydrogen", "nitrogen",
            "iron", "copper", "gold", "silver", "telescope", "microscope", "satellite",
            "rocket", "circuit", "battery", "engine", "reactor", "evolution", "mutation",
            "adaptation", "extinction", "ecosystem", "habitat", "species", "predator",
            "temperature", "pressure", "density", "energy", "force", "mass", "velocity",
            "friction", "brain", "nerve", "muscle", "bone", "blood", "heart", "lung", "skin",
            "climate", "ocean", "atmosphere", "radiation", "electric", "magnetic", "thermal",
            "nuclear", "robot", "algorithm", "network", "code", "digital", "binary", "sensor",
            "processor",
        ],
    ),
    (
        "emotional",
        &[
            "joy", "sorrow", "anger", "fear", "love", "hate", "hope", "despair", "courage",
            "doubt", "pride", "shame", "guilt", "envy", "trust", "betrayal", "peace", "chaos",
            "freedom", "trapped", "lonely", "together", "lost", "found", "dream", "nightmare",
            "memory", "forgotten", "secret", "truth", "lie", "promise", "gentle", "fierce",
            "calm", "restless", "patient", "anxious", "confident", "fragile", "warm", "cold",
            "bright", "dark", "silent", "loud", "empty", "full", "beginning", "ending",
            "forever", "moment", "yesterday", "tomorrow", "journey", "arrival", "heart", "soul",
            "spirit", "mind", "voice", "touch", "sight", "whisper", "comfort", "pain",
            "healing", "wound", "strength", "weakness", "growth", "decay", "wonder", "boredom",
            "surprise", "shock", "relief", "tension", "passion", "apathy", "belonging", "exile",
            "shelter", "storm", "sunrise", "sunset", "shadow", "glow", "innocent", "wise",
            "wild", "tame", "broken", "whole", "sacred", "mundane",
        ],
    ),
    (
        "adjectives",
        &[
            "tiny", "enormous", "round", "flat", "narrow", "wide", "tall", "short", "freezing",
            "boiling", "smooth", "rough", "sticky", "slippery", "fuzzy", "crisp", "beautiful",
            "ugly", "shiny", "dull", "colorful", "pale", "transparent", "opaque", "clever",
            "foolish", "brave", "cowardly", "generous", "greedy", "honest", "sneaky", "ancient",
            "modern", "fresh", "stale", "young", "old", "new", "worn", "fierce", "mild",
            "extreme", "subtle", "massive", "faint", "powerful", "weak", "cheerful", "gloomy",
            "calm", "frantic", "peaceful", "hostile", "playful", "serious", "perfect", "flawed",
            "rare", "common", "genuine", "fake", "valuable", "worthless", "heavy", "light",
            "thick", "thin", "rigid", "flexible", "hollow", "solid", "fragrant", "putrid",
            "loud", "silent", "sweet", "sour", "bright", "dim", "alive", "dead", "broken",
            "whole", "frozen", "melted", "empty", "crowded", "strange", "normal", "secret",
            "obvious", "dangerous", "safe", "lucky", "cursed",
        ],
    ),
    (
        "adverbs",
        &[
            "quickly", "slowly", "suddenly", "gradually", "instantly", "eventually", "hastily",
            "leisurely", "loudly", "quietly", "silently", "softly", "clearly", "faintly",
            "sharply", "gently", "carefully", "recklessly", "gracefully", "clumsily", "boldly",
            "timidly", "fiercely", "calmly", "definitely", "maybe", "probably", "possibly",
            "certainly", "barely", "hardly", "absolutely", "always", "never", "sometimes",
            "often", "rarely", "constantly", "occasionally", "repeatedly", "happily", "sadly",
            "angrily", "fearfully", "proudly", "shyly", "eagerly", "reluctantly", "completely",
            "partially", "extremely", "slightly", "totally", "merely", "deeply", "nearly",
            "forward", "backward", "upward", "downward", "inward", "outward", "sideways",
            "around", "secretly", "openly", "invisibly", "obviously", "mysteriously", "plainly",
            "covertly", "blatantly", "already", "soon", "recently", "formerly", "presently",
            "afterward", "meanwhile", "finally", "perfectly", "poorly", "brilliantly",
            "terribly", "beautifully", "horribly", "wonderfully", "awkwardly", "together",
            "alone", "publicly", "privately", "formally", "casually", "politely", "rudely",
        ],
    ),
];
