/// (name, latitude, longitude) for every city the app knows about.
pub(crate) static CITY_COORDINATES: &[(&str, f64, f64)] = &[
    ("Paris", 48.8566, 2.3522),
    ("Marseille", 43.2965, 5.3698),
    ("Lyon", 45.7640, 4.8357),
    ("Toulouse", 43.6047, 1.4442),
    ("Nice", 43.7102, 7.2620),
    ("Nantes", 47.2184, -1.5536),
    ("Strasbourg", 48.5734, 7.7521),
    ("Montpellier", 43.6108, 3.8767),
    ("Bordeaux", 44.8378, -0.5792),
    ("Lille", 50.6292, 3.0573),
    ("Rennes", 48.1173, -1.6778),
    ("Reims", 49.2583, 4.0317),
    ("Le Havre", 49.4944, 0.1079),
    ("Saint-Étienne", 45.4397, 4.3872),
    ("Toulon", 43.1242, 5.9280),
    ("Angers", 47.4784, -0.5632),
    ("Grenoble", 45.1885, 5.7245),
    ("Dijon", 47.3220, 5.0415),
    ("Nîmes", 43.8367, 4.3601),
    ("Aix-en-Provence", 43.5297, 5.4474),
    ("Brest", 48.3904, -4.4861),
    ("Le Mans", 48.0061, 0.1996),
    ("Amiens", 49.8941, 2.2958),
    ("Tours", 47.3941, 0.6848),
    ("Limoges", 45.8336, 1.2611),
    ("Clermont-Ferrand", 45.7772, 3.0870),
    ("Villeurbanne", 45.7719, 4.8902),
    ("Besançon", 47.2378, 6.0241),
    ("Orléans", 47.9029, 1.9093),
    ("Metz", 49.1193, 6.1757),
    ("Rouen", 49.4432, 1.0999),
    ("Mulhouse", 47.7508, 7.3359),
    ("Caen", 49.1829, -0.3707),
    ("Nancy", 48.6921, 6.1844),
    ("Avignon", 43.9493, 4.8055),
    ("Perpignan", 42.6887, 2.8948),
    ("La Rochelle", 46.1603, -1.1511),
    ("Cannes", 43.5528, 7.0174),
    ("Annecy", 45.8992, 6.1294),
    ("Biarritz", 43.4832, -1.5586),
];
